//! Submission entity - Represents a proof-of-visit claim awaiting review.
//!
//! Each submission pairs a selfie and a receipt image uploaded by a member,
//! names the partner store it claims a visit to (denormalized, not a foreign
//! key), and carries the review outcome once an admin has looked at it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Derived store category, computed from the store's free-text type at
/// submission time by [`crate::core::category::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum StoreCategory {
    /// Matched a restaurant keyword
    #[sea_orm(string_value = "restaurant")]
    Restaurant,
    /// Matched a cafe keyword
    #[sea_orm(string_value = "cafe")]
    Cafe,
    /// Matched no keyword
    #[sea_orm(string_value = "others")]
    Others,
}

/// Review state of a submission. Starts at pending and transitions exactly
/// once to approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted; counts toward the submitter's badges
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Submission database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Unique identifier for the submission
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile id of the submitting member
    pub user_id: String,
    /// Name of the claimed partner store, copied verbatim at submission time
    pub store_name: String,
    /// Category derived from the store's type string when the submission was made
    pub store_category: StoreCategory,
    /// Current review state
    pub status: SubmissionStatus,
    /// Object-storage URL of the selfie image
    pub selfie_url: String,
    /// Object-storage URL of the receipt image
    pub receipt_url: String,
    /// Profile id of the reviewing admin, once reviewed
    pub reviewed_by: Option<String>,
    /// When the review decision was made
    pub reviewed_at: Option<DateTimeUtc>,
    /// Optional reviewer notes shown to the submitter
    pub admin_notes: Option<String>,
    /// When the submission was created
    pub created_at: DateTimeUtc,
    /// When the submission was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Submission and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each submission belongs to the submitting profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id"
    )]
    Submitter,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submitter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
