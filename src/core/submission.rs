//! Submission business logic - the proof-of-visit lifecycle.
//!
//! Members submit a selfie/receipt image pair claiming a visit to a partner
//! store; admins review each submission exactly once, approving or rejecting
//! it. Creation validates its inputs before touching the database, and the
//! review decision, its timestamp, and the resulting feed notification are
//! written atomically.

use crate::{
    core::category::classify,
    entities::{
        Profile, Submission, notification,
        submission::{self, StoreCategory, SubmissionStatus},
    },
    errors::{Error, Result},
    session::Session,
    storage::ObjectStore,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde_json::json;
use tracing::{info, instrument};

/// Outcome an admin hands down for a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the claimed visit; it counts toward badges
    Approve,
    /// Decline the claimed visit
    Reject,
}

impl ReviewDecision {
    const fn status(self) -> SubmissionStatus {
        match self {
            Self::Approve => SubmissionStatus::Approved,
            Self::Reject => SubmissionStatus::Rejected,
        }
    }

    const fn action_code(self) -> &'static str {
        match self {
            Self::Approve => "submission_approved",
            Self::Reject => "submission_rejected",
        }
    }
}

/// A pending submission joined with its submitter's display name, as shown
/// in the review queue.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// The submission awaiting review
    pub submission: submission::Model,
    /// Display name of the submitting member, when the profile still exists
    pub submitter_name: Option<String>,
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field,
            message: "cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Creates a proof-of-visit submission with both image references already
/// uploaded. Status is always pending immediately after creation.
///
/// Every required field is validated before any database call is made.
pub async fn create_submission(
    db: &DatabaseConnection,
    user_id: &str,
    store_name: &str,
    store_category: StoreCategory,
    selfie_url: &str,
    receipt_url: &str,
) -> Result<submission::Model> {
    require_non_empty("user_id", user_id)?;
    require_non_empty("store_name", store_name)?;
    require_non_empty("selfie_url", selfie_url)?;
    require_non_empty("receipt_url", receipt_url)?;

    let now = chrono::Utc::now();
    let model = submission::ActiveModel {
        user_id: Set(user_id.to_string()),
        store_name: Set(store_name.trim().to_string()),
        store_category: Set(store_category),
        status: Set(SubmissionStatus::Pending),
        selfie_url: Set(selfie_url.to_string()),
        receipt_url: Set(receipt_url.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(
        submission_id = result.id,
        user_id, store_name, "Created submission"
    );
    Ok(result)
}

/// The full submit-proof flow: checks the caller may submit, uploads both
/// images concurrently, and creates the pending submission only once both
/// uploads have succeeded.
///
/// The caller's role is re-read from the database rather than trusted from
/// the session. If either upload fails, no submission is created; a file
/// from the other, successful upload is left behind in object storage.
#[instrument(skip(db, store, selfie, receipt))]
pub async fn submit_proof<S: ObjectStore>(
    db: &DatabaseConnection,
    store: &S,
    session: &Session,
    store_name: &str,
    store_type: &str,
    selfie: &[u8],
    receipt: &[u8],
) -> Result<submission::Model> {
    require_non_empty("store_name", store_name)?;
    if selfie.is_empty() {
        return Err(Error::Validation {
            field: "selfie_image",
            message: "no image data provided".to_string(),
        });
    }
    if receipt.is_empty() {
        return Err(Error::Validation {
            field: "receipt_image",
            message: "no image data provided".to_string(),
        });
    }

    let profile = Profile::find_by_id(&session.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: session.user_id.clone(),
        })?;
    if !profile.role.can_submit() {
        return Err(Error::PermissionDenied {
            action: "submit proof of visit",
            required: "member",
        });
    }

    let stamp = chrono::Utc::now().timestamp_millis();
    let selfie_key = format!("{}-{stamp}-selfie.jpg", session.user_id);
    let receipt_key = format!("{}-{stamp}-receipt.jpg", session.user_id);
    let (selfie_url, receipt_url) = tokio::try_join!(
        store.upload(
            "submissions",
            &selfie_key,
            selfie,
            "image/jpeg",
        ),
        store.upload(
            "submissions",
            &receipt_key,
            receipt,
            "image/jpeg",
        ),
    )?;

    create_submission(
        db,
        &session.user_id,
        store_name,
        classify(store_type),
        &selfie_url,
        &receipt_url,
    )
    .await
}

/// Retrieves all of a member's submissions, newest first. No pagination.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<submission::Model>> {
    Submission::find()
        .filter(submission::Column::UserId.eq(user_id))
        .order_by_desc(submission::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every pending submission joined with its submitter's display
/// name, oldest first so the review queue is worked in arrival order.
pub async fn list_pending(db: &DatabaseConnection) -> Result<Vec<PendingSubmission>> {
    let rows = Submission::find()
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .order_by_asc(submission::Column::CreatedAt)
        .find_also_related(Profile)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(found, submitter)| PendingSubmission {
            submission: found,
            submitter_name: submitter.map(|p| p.display_name),
        })
        .collect())
}

/// Retrieves a single submission by id.
pub async fn get_submission_by_id(
    db: &DatabaseConnection,
    submission_id: i64,
) -> Result<Option<submission::Model>> {
    Submission::find_by_id(submission_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies an admin's review decision to a pending submission.
///
/// The reviewer's admin role is re-validated against the database before
/// anything is written; the session's claimed role is never trusted here.
/// A submission transitions out of pending exactly once - reviewing an
/// already-reviewed submission fails. The status change and the submitter's
/// feed notification are committed together.
#[instrument(skip(db, notes))]
pub async fn review_submission(
    db: &DatabaseConnection,
    reviewer_id: &str,
    submission_id: i64,
    decision: ReviewDecision,
    notes: Option<String>,
) -> Result<submission::Model> {
    let txn = db.begin().await?;

    let reviewer = Profile::find_by_id(reviewer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: reviewer_id.to_string(),
        })?;
    if !reviewer.role.is_admin() {
        return Err(Error::PermissionDenied {
            action: "review submission",
            required: "admin",
        });
    }

    let found = Submission::find_by_id(submission_id)
        .one(&txn)
        .await?
        .ok_or(Error::SubmissionNotFound { id: submission_id })?;
    if found.status != SubmissionStatus::Pending {
        return Err(Error::AlreadyReviewed { id: submission_id });
    }

    let recipient_id = found.user_id.clone();
    let store_name = found.store_name.clone();
    let now = chrono::Utc::now();

    let mut active: submission::ActiveModel = found.into();
    active.status = Set(decision.status());
    active.reviewed_by = Set(Some(reviewer_id.to_string()));
    active.reviewed_at = Set(Some(now));
    active.admin_notes = Set(notes);
    active.updated_at = Set(now);
    let updated = active.update(&txn).await?;

    // The feed row the original backend wrote from a trigger
    notification::ActiveModel {
        recipient_id: Set(recipient_id),
        actor_id: Set(Some(reviewer_id.to_string())),
        action: Set(decision.action_code().to_string()),
        object_type: Set("submission".to_string()),
        object_id: Set(submission_id.to_string()),
        data: Set(Some(json!({ "store_name": store_name }))),
        is_read: Set(false),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        submission_id,
        reviewer_id,
        decision = ?decision,
        "Reviewed submission"
    );
    Ok(updated)
}
