//! Verification gate business logic.
//!
//! A subscriber becomes a member by clearing two independent flags: the
//! email confirmation (set by the auth backend, observed here by
//! re-fetching the profile) and the onboarding questionnaire. The role
//! upgrade re-reads both flags from the database immediately before the
//! write; a caller's own view of its verification state is UX convenience,
//! not a security boundary.

use crate::{
    entities::{Profile, profile::{self, Role}},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Snapshot of the two verification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationProgress {
    /// Whether the auth backend has confirmed the email address
    pub email_confirmed: bool,
    /// Whether the onboarding questionnaire has been completed
    pub questionnaire_complete: bool,
}

impl VerificationProgress {
    /// Reads the flags off a fetched profile.
    #[must_use]
    pub const fn from_profile(profile: &profile::Model) -> Self {
        Self {
            email_confirmed: profile.email_confirmed_at.is_some(),
            questionnaire_complete: profile.verification_completed,
        }
    }

    /// Whether both flags are set and the role upgrade may proceed.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.email_confirmed && self.questionnaire_complete
    }

    /// The requirements still unmet, in a fixed order.
    #[must_use]
    pub fn missing_requirements(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.email_confirmed {
            missing.push("email confirmation");
        }
        if !self.questionnaire_complete {
            missing.push("questionnaire");
        }
        missing
    }
}

async fn fetch_profile(db: &DatabaseConnection, user_id: &str) -> Result<profile::Model> {
    Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })
}

/// Re-fetches the profile and reports the current verification flags.
pub async fn verification_progress(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<VerificationProgress> {
    let profile = fetch_profile(db, user_id).await?;
    Ok(VerificationProgress::from_profile(&profile))
}

/// Records completion of the onboarding questionnaire.
#[instrument(skip(db))]
pub async fn complete_questionnaire(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    let profile = fetch_profile(db, user_id).await?;

    let mut active: profile::ActiveModel = profile.into();
    active.verification_completed = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(user_id, "Questionnaire completed");
    Ok(updated)
}

/// Upgrades a fully verified subscriber to member.
///
/// Both flags are checked against the just-fetched profile row; when either
/// is missing the error names every unmet requirement. Roles only move
/// upward: calling this on a profile that is already member or above
/// returns it unchanged.
#[instrument(skip(db))]
pub async fn request_role_upgrade(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    let profile = fetch_profile(db, user_id).await?;

    if profile.role != Role::Subscriber {
        return Ok(profile);
    }

    let progress = VerificationProgress::from_profile(&profile);
    if !progress.is_eligible() {
        return Err(Error::VerificationIncomplete {
            missing: progress.missing_requirements().join(", "),
        });
    }

    let mut active: profile::ActiveModel = profile.into();
    active.role = Set(Role::Member);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(user_id, "Role upgraded to member");
    Ok(updated)
}
