//! Profile entity - Represents a registered user of the loyalty programme.
//!
//! Each profile carries the member's role, the two verification flags
//! (email confirmation and questionnaire completion) gating the
//! subscriber-to-member upgrade, and free-form preference fields.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership role ladder. Transitions are monotonic: subscriber to member
/// through the verification gate, member to affiliate through the admin-reviewed
/// affiliate request. There is no downgrade path anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Freshly registered, not yet verified
    #[sea_orm(string_value = "subscriber")]
    Subscriber,
    /// Verified member, may submit proof of visit
    #[sea_orm(string_value = "member")]
    Member,
    /// Member with an approved affiliate request
    #[sea_orm(string_value = "affiliate")]
    Affiliate,
    /// Reviewer role, may approve or reject submissions
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Lowercase wire name of the role, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subscriber => "subscriber",
            Self::Member => "member",
            Self::Affiliate => "affiliate",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may create proof-of-visit submissions.
    #[must_use]
    pub const fn can_submit(self) -> bool {
        matches!(self, Self::Member | Self::Affiliate | Self::Admin)
    }

    /// Whether this role may review submissions and affiliate requests.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// State of a member's request to become an affiliate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AffiliateRequestStatus {
    /// Awaiting admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; the profile's role has been raised to affiliate
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected; the member may ask again
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Opaque user id assigned by the auth backend at registration
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Contact email address
    pub email: String,
    /// Name shown on submissions and notifications
    pub display_name: String,
    /// Optional avatar image URL
    pub avatar_url: Option<String>,
    /// Current membership role
    pub role: Role,
    /// When the email address was confirmed; set by the auth backend's
    /// confirmation callback, observed here by re-fetching the profile
    pub email_confirmed_at: Option<DateTimeUtc>,
    /// Whether the onboarding questionnaire has been completed
    pub verification_completed: bool,
    /// User id of the inviter, resolved from an invitation code at registration
    pub invited_by: Option<String>,
    /// State of the member's affiliate request, if one was ever made
    pub affiliate_request_status: Option<AffiliateRequestStatus>,
    /// Preferred contact channel (free-form, e.g. `"email"`, `"phone"`)
    pub contact_preference: Option<String>,
    /// Free-form travel preference notes
    pub travel_preference: Option<String>,
    /// When the profile was created
    pub created_at: DateTimeUtc,
    /// When the profile was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One profile has many proof-of-visit submissions
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
