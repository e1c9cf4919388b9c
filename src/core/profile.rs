//! Profile business logic - registration, preference updates, and the
//! affiliate request flow.
//!
//! Profiles are created once at registration with the subscriber role and
//! are never deleted. Preference updates follow an optional-fields pattern:
//! only the fields a caller supplies are written, everything else is left
//! untouched.

use crate::{
    entities::{
        InvitationCode, Profile, invitation_code,
        profile::{self, AffiliateRequestStatus, Role},
    },
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Optional-field update for the free-form profile preference fields.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdate {
    /// New display name
    pub display_name: Option<String>,
    /// New avatar image URL
    pub avatar_url: Option<String>,
    /// New preferred contact channel
    pub contact_preference: Option<String>,
    /// New travel preference notes
    pub travel_preference: Option<String>,
}

/// Registers a new profile with the default subscriber role.
///
/// An invitation code, when supplied, is resolved to its owning member and
/// recorded as the new profile's inviter; an unknown code fails the whole
/// registration.
#[instrument(skip(db))]
pub async fn register_profile(
    db: &DatabaseConnection,
    user_id: &str,
    email: &str,
    display_name: &str,
    invite_code: Option<&str>,
) -> Result<profile::Model> {
    if user_id.trim().is_empty() {
        return Err(Error::Validation {
            field: "user_id",
            message: "cannot be empty".to_string(),
        });
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(Error::Validation {
            field: "email",
            message: "must be a valid email address".to_string(),
        });
    }
    if display_name.trim().is_empty() {
        return Err(Error::Validation {
            field: "display_name",
            message: "cannot be empty".to_string(),
        });
    }

    let invited_by = match invite_code {
        Some(code) => Some(resolve_invitation_code(db, code).await?.owner_id),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = profile::ActiveModel {
        id: Set(user_id.to_string()),
        email: Set(email.trim().to_string()),
        display_name: Set(display_name.trim().to_string()),
        avatar_url: Set(None),
        role: Set(Role::Subscriber),
        email_confirmed_at: Set(None),
        verification_completed: Set(false),
        invited_by: Set(invited_by),
        affiliate_request_status: Set(None),
        contact_preference: Set(None),
        travel_preference: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let result = model.insert(db).await?;
    info!(user_id, "Registered profile");
    Ok(result)
}

/// Retrieves a profile by user id, returning None if it does not exist.
pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<profile::Model>> {
    Profile::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Applies a partial preference update to a profile.
pub async fn update_preferences(
    db: &DatabaseConnection,
    user_id: &str,
    update: PreferenceUpdate,
) -> Result<profile::Model> {
    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let mut active: profile::ActiveModel = profile.into();
    if let Some(display_name) = update.display_name {
        active.display_name = Set(display_name);
    }
    if let Some(avatar_url) = update.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    if let Some(contact) = update.contact_preference {
        active.contact_preference = Set(Some(contact));
    }
    if let Some(travel) = update.travel_preference {
        active.travel_preference = Set(Some(travel));
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await.map_err(Into::into)
}

/// Creates an invitation code owned by the given member.
pub async fn create_invitation_code(
    db: &DatabaseConnection,
    owner_id: &str,
    code: &str,
) -> Result<invitation_code::Model> {
    if code.trim().is_empty() {
        return Err(Error::Validation {
            field: "code",
            message: "cannot be empty".to_string(),
        });
    }

    invitation_code::ActiveModel {
        code: Set(code.trim().to_string()),
        owner_id: Set(owner_id.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

async fn resolve_invitation_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<invitation_code::Model> {
    InvitationCode::find()
        .filter(invitation_code::Column::Code.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| Error::InvitationCodeNotFound {
            code: code.to_string(),
        })
}

/// Records a member's request to become an affiliate, pending admin review.
/// A rejected member may request again.
pub async fn request_affiliate_status(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    if profile.role != Role::Member {
        return Err(Error::PermissionDenied {
            action: "request affiliate status",
            required: "member",
        });
    }

    let mut active: profile::ActiveModel = profile.into();
    active.affiliate_request_status = Set(Some(AffiliateRequestStatus::Pending));
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Applies an admin's decision to a pending affiliate request.
///
/// The admin role is re-validated against the database before the write.
/// Approval raises the member's role to affiliate.
#[instrument(skip(db))]
pub async fn review_affiliate_request(
    db: &DatabaseConnection,
    admin_id: &str,
    user_id: &str,
    approve: bool,
) -> Result<profile::Model> {
    let admin = Profile::find_by_id(admin_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: admin_id.to_string(),
        })?;
    if !admin.role.is_admin() {
        return Err(Error::PermissionDenied {
            action: "review affiliate request",
            required: "admin",
        });
    }

    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;
    if profile.affiliate_request_status != Some(AffiliateRequestStatus::Pending) {
        return Err(Error::Validation {
            field: "affiliate_request_status",
            message: "no pending affiliate request".to_string(),
        });
    }

    let mut active: profile::ActiveModel = profile.into();
    if approve {
        active.role = Set(Role::Affiliate);
        active.affiliate_request_status = Set(Some(AffiliateRequestStatus::Approved));
    } else {
        active.affiliate_request_status = Set(Some(AffiliateRequestStatus::Rejected));
    }
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(user_id, admin_id, approve, "Reviewed affiliate request");
    Ok(updated)
}
