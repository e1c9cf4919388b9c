//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod invitation_code;
pub mod notification;
pub mod profile;
pub mod submission;

// Re-export specific types to avoid conflicts
pub use invitation_code::{
    Column as InvitationCodeColumn, Entity as InvitationCode, Model as InvitationCodeModel,
};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use submission::{Column as SubmissionColumn, Entity as Submission, Model as SubmissionModel};
