//! Account operations against the black-box auth backend.
//!
//! The only operation this crate layers logic over is the password change,
//! which distinguishes a third outcome besides success and failure: the
//! backend call not resolving within a deadline. Both non-failure outcomes
//! force a sign-out so the user re-authenticates with a known-good session.

use crate::{
    errors::{Error, Result},
    session::SessionStore,
};
use std::time::Duration;
use tracing::{info, warn};

const MIN_PASSWORD_LEN: usize = 8;

/// The slice of the auth provider this crate calls. Everything behind it -
/// token handling, hashing, transport - is the provider's business.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Asks the provider to replace the user's password.
    async fn change_password(&self, user_id: &str, new_password: &str) -> Result<()>;
}

/// How a password change concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
    /// The backend confirmed the change
    Applied,
    /// The backend did not answer within the deadline. The change has most
    /// likely been applied server-side anyway, so the caller is treated as
    /// changed-and-signed-out rather than failed.
    AssumedApplied,
}

/// Changes a user's password with a deadline on the backend call.
///
/// On confirmation or deadline expiry the session store is signed out,
/// forcing a fresh login; a backend rejection is passed through unchanged
/// and leaves the session alone.
pub async fn change_password<A: AuthBackend>(
    auth: &A,
    sessions: &SessionStore,
    user_id: &str,
    new_password: &str,
    deadline: Duration,
) -> Result<PasswordChangeOutcome> {
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation {
            field: "new_password",
            message: format!("must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }

    match tokio::time::timeout(deadline, auth.change_password(user_id, new_password)).await {
        Ok(Ok(())) => {
            info!(user_id, "Password changed");
            sessions.sign_out();
            Ok(PasswordChangeOutcome::Applied)
        }
        Ok(Err(e)) => Err(e),
        Err(_) => {
            // No answer within the deadline; the server may still have
            // applied the change, so re-login is required either way.
            warn!(user_id, "Password change did not resolve in time");
            sessions.sign_out();
            Ok(PasswordChangeOutcome::AssumedApplied)
        }
    }
}
