//! Core business logic - framework-agnostic membership, submission, badge,
//! and notification operations. Everything here takes an explicit database
//! connection and returns structured data for a frontend to render.

/// Password change against the auth backend
pub mod account;
/// Badge tier derivation from approved-submission counts
pub mod badges;
/// The shared store-type classifier
pub mod category;
/// Notification feed reads and read-flag updates
pub mod notifications;
/// Registration, preferences, and the affiliate request flow
pub mod profile;
/// Proof-of-visit submission lifecycle
pub mod submission;
/// The two-flag verification gate
pub mod verification;
