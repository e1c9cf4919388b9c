//! Notification entity - Rows in a member's activity feed.
//!
//! Feed rows record an action code (e.g. `"submission_approved"`), the
//! object it concerns, an optional actor, and an optional structured JSON
//! payload. The crate only reads and mutates the read flag; rows are
//! written when a review decision lands.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile id of the member whose feed this row belongs to
    pub recipient_id: String,
    /// Profile id of whoever triggered the notification, if anyone
    pub actor_id: Option<String>,
    /// Free-text action code, e.g. `"submission_approved"`
    pub action: String,
    /// Kind of object the notification concerns, e.g. `"submission"`
    pub object_type: String,
    /// Identifier of the concerned object, stringly typed across object kinds
    pub object_id: String,
    /// Optional structured payload for rendering the feed entry
    pub data: Option<Json>,
    /// Whether the recipient has seen this notification
    pub is_read: bool,
    /// When the notification was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The profile that triggered the notification; joined for display
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ActorId",
        to = "super::profile::Column::Id"
    )]
    Actor,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
