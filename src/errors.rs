//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Nothing here is
//! fatal to the process: callers surface the error and the underlying state
//! is left unchanged, so the operation can simply be retried.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// A required field was missing or malformed, caught before any write
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },

    /// No profile row exists for the given user id
    #[error("Profile not found: {user_id}")]
    ProfileNotFound {
        /// The user id that was looked up
        user_id: String,
    },

    /// No submission row exists for the given id
    #[error("Submission not found: {id}")]
    SubmissionNotFound {
        /// The submission id that was looked up
        id: i64,
    },

    /// No notification row exists for the given id
    #[error("Notification not found: {id}")]
    NotificationNotFound {
        /// The notification id that was looked up
        id: i64,
    },

    /// The invitation code does not exist
    #[error("Invitation code not found: {code}")]
    InvitationCodeNotFound {
        /// The code that was presented
        code: String,
    },

    /// The caller's role does not permit the operation
    #[error("Permission denied: {action} requires the {required} role")]
    PermissionDenied {
        /// The operation that was attempted
        action: &'static str,
        /// The role the operation requires
        required: &'static str,
    },

    /// The verification gate is not satisfied; lists what is still missing
    #[error("Verification incomplete: missing {missing}")]
    VerificationIncomplete {
        /// Comma-separated list of unmet requirements
        missing: String,
    },

    /// The submission already left the pending state; status transitions
    /// happen exactly once
    #[error("Submission {id} has already been reviewed")]
    AlreadyReviewed {
        /// The submission id
        id: i64,
    },

    /// An object-storage upload failed
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the upload failure
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document collection could not be parsed
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
