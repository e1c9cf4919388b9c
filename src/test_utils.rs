//! Shared test utilities for `Stampbook`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults, plus
//! in-memory object store doubles for the upload flows.

use crate::{
    core::{
        profile as profile_ops,
        submission::{self as submission_ops, ReviewDecision},
    },
    entities::{
        notification,
        profile::{self, Role},
        submission::StoreCategory,
    },
    errors::{Error, Result},
    session::Session,
    storage::ObjectStore,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Initializes tracing for a test run; safe to call more than once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("debug")
        }))
        .with_test_writer()
        .try_init();
}

/// Registers a plain subscriber profile. Email and display name derive from
/// the id.
pub async fn create_test_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    profile_ops::register_profile(db, user_id, &format!("{user_id}@example.com"), user_id, None)
        .await
}

/// Registers a profile and forces it into the given role. Roles past
/// subscriber also get both verification flags set, matching how a profile
/// would actually have reached that role.
pub async fn create_profile_with_role(
    db: &DatabaseConnection,
    user_id: &str,
    role: Role,
) -> Result<profile::Model> {
    let created = create_test_profile(db, user_id).await?;

    let mut active: profile::ActiveModel = created.into();
    active.role = Set(role);
    if role != Role::Subscriber {
        active.email_confirmed_at = Set(Some(chrono::Utc::now()));
        active.verification_completed = Set(true);
    }
    active.update(db).await.map_err(Into::into)
}

/// Registers a verified member profile.
pub async fn create_member_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    create_profile_with_role(db, user_id, Role::Member).await
}

/// Registers an admin profile.
pub async fn create_admin_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    create_profile_with_role(db, user_id, Role::Admin).await
}

/// Simulates the auth backend's email-confirmation callback by stamping the
/// profile directly.
pub async fn confirm_email_for_test(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    let found = profile_ops::get_profile(db, user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let mut active: profile::ActiveModel = found.into();
    active.email_confirmed_at = Set(Some(chrono::Utc::now()));
    active.update(db).await.map_err(Into::into)
}

/// Creates a pending test submission with placeholder image URLs.
pub async fn create_test_submission(
    db: &DatabaseConnection,
    user_id: &str,
    category: StoreCategory,
) -> Result<crate::entities::submission::Model> {
    submission_ops::create_submission(
        db,
        user_id,
        "Test Store",
        category,
        "file:///media/test-selfie.jpg",
        "file:///media/test-receipt.jpg",
    )
    .await
}

/// Approves a pending submission as the given admin.
pub async fn approve_for_test(
    db: &DatabaseConnection,
    admin_id: &str,
    submission_id: i64,
) -> Result<()> {
    submission_ops::review_submission(db, admin_id, submission_id, ReviewDecision::Approve, None)
        .await?;
    Ok(())
}

/// Rejects a pending submission as the given admin.
pub async fn reject_for_test(
    db: &DatabaseConnection,
    admin_id: &str,
    submission_id: i64,
) -> Result<()> {
    submission_ops::review_submission(db, admin_id, submission_id, ReviewDecision::Reject, None)
        .await?;
    Ok(())
}

/// Inserts a feed notification directly, standing in for the backend-side
/// writers this crate does not model.
pub async fn create_test_notification(
    db: &DatabaseConnection,
    recipient_id: &str,
    actor_id: Option<&str>,
    action: &str,
) -> Result<notification::Model> {
    notification::ActiveModel {
        recipient_id: Set(recipient_id.to_string()),
        actor_id: Set(actor_id.map(ToString::to_string)),
        action: Set(action.to_string()),
        object_type: Set("submission".to_string()),
        object_id: Set("1".to_string()),
        data: Set(None),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A member session for the given user id.
pub fn test_session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        role: Role::Member,
    }
}

/// Object store double that keeps uploads in memory and hands out `mem://`
/// URLs.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    uploads: Mutex<Vec<String>>,
}

impl MemoryObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many objects have been uploaded so far.
    pub fn uploaded_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        filename: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<String> {
        let key = format!("{bucket}/{filename}");
        self.uploads.lock().unwrap().push(key.clone());
        Ok(format!("mem://{key}"))
    }
}

/// Object store double whose uploads always fail.
#[derive(Debug, Default)]
pub struct FailingObjectStore;

impl ObjectStore for FailingObjectStore {
    async fn upload(
        &self,
        _bucket: &str,
        _filename: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<String> {
        Err(Error::Storage {
            message: "upload refused".to_string(),
        })
    }
}
