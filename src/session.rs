//! Session state - an explicit session object and a process-wide store.
//!
//! Repository operations that act on behalf of a signed-in user take a
//! [`Session`] rather than reading ambient global state. The [`SessionStore`]
//! is the single place the current session lives; interested parties
//! subscribe and are notified on every sign-in and sign-out. The session's
//! cached role is display convenience only - security-relevant operations
//! re-read the role from the database.

use crate::entities::profile::Role;
use tokio::sync::watch;

/// The signed-in user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Profile id of the signed-in user
    pub user_id: String,
    /// Role at sign-in time; not authoritative
    pub role: Role,
}

/// Process-wide observable holder of the current session.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Creates a store with no signed-in session.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the current session; subscribers are notified.
    pub fn sign_in(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    /// Clears the current session; subscribers are notified.
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// A snapshot of the current session, if anyone is signed in.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes. The receiver observes every
    /// subsequent sign-in and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
