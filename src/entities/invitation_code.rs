//! Invitation code entity - Codes members hand out to new registrants.
//! Redeeming a code at registration records the code's owner as the new
//! profile's inviter. Codes are not consumed; one code may invite many users.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invitation code database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invitation_codes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The shareable code string
    #[sea_orm(unique)]
    pub code: String,
    /// Profile id of the member who owns this code
    pub owner_id: String,
    /// When the code was created
    pub created_at: DateTimeUtc,
}

/// `InvitationCode` has no relationships that the crate navigates
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
