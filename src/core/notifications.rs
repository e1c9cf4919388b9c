//! Notification feed business logic.
//!
//! The feed is read-mostly: rows are written when a review decision lands
//! and everything else here lists them, flips the read flag, or deletes
//! them. The unread count is derived over the fetched list rather than
//! asked of the database, so it is only as fresh as the last fetch.

use crate::{
    entities::{Notification, Profile, notification},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, sea_query::Expr, prelude::*};
use tracing::debug;

/// A feed row joined with the acting profile's display fields, ready for
/// rendering.
#[derive(Debug, Clone)]
pub struct NotificationView {
    /// The notification itself
    pub notification: notification::Model,
    /// Display name of the actor, when one exists
    pub actor_name: Option<String>,
    /// Avatar URL of the actor, when one exists
    pub actor_avatar: Option<String>,
}

/// Retrieves a member's full feed, newest first, with actor display fields
/// joined in where an actor id is present. No pagination.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<NotificationView>> {
    let rows = Notification::find()
        .filter(notification::Column::RecipientId.eq(user_id))
        .order_by_desc(notification::Column::CreatedAt)
        .find_also_related(Profile)
        .all(db)
        .await?;

    debug!(user_id, count = rows.len(), "Fetched notification feed");
    Ok(rows
        .into_iter()
        .map(|(row, actor)| {
            let (actor_name, actor_avatar) = actor
                .map(|p| (Some(p.display_name), p.avatar_url))
                .unwrap_or((None, None));
            NotificationView {
                notification: row,
                actor_name,
                actor_avatar,
            }
        })
        .collect())
}

/// Marks one notification as read.
pub async fn mark_read(db: &DatabaseConnection, id: i64) -> Result<()> {
    let row = Notification::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotificationNotFound { id })?;

    let mut active: notification::ActiveModel = row.into();
    active.is_read = Set(true);
    active.update(db).await?;
    Ok(())
}

/// Marks every unread notification of a member as read, returning how many
/// rows changed.
pub async fn mark_all_read(db: &DatabaseConnection, user_id: &str) -> Result<u64> {
    let result = Notification::update_many()
        .col_expr(notification::Column::IsRead, Expr::value(true))
        .filter(notification::Column::RecipientId.eq(user_id))
        .filter(notification::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    debug!(user_id, marked = result.rows_affected, "Marked feed read");
    Ok(result.rows_affected)
}

/// Deletes one notification.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = Notification::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotificationNotFound { id });
    }
    Ok(())
}

/// Unread count over an already-fetched feed.
#[must_use]
pub fn unread_count(feed: &[NotificationView]) -> usize {
    feed.iter().filter(|v| !v.notification.is_read).count()
}
