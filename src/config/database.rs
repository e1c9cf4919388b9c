//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Table
//! creation uses `Schema::create_table_from_entity` so the database schema
//! always matches the entity definitions without hand-written SQL.

use crate::entities::{InvitationCode, Notification, Profile, Submission};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Resolves the database URL from `DATABASE_URL` (a `.env` file is honoured)
/// with a local `SQLite` file as the fallback.
#[must_use]
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/stampbook.sqlite".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let profile_table = schema.create_table_from_entity(Profile);
    let submission_table = schema.create_table_from_entity(Submission);
    let notification_table = schema.create_table_from_entity(Notification);
    let invitation_code_table = schema.create_table_from_entity(InvitationCode);

    db.execute(builder.build(&profile_table)).await?;
    db.execute(builder.build(&submission_table)).await?;
    db.execute(builder.build(&notification_table)).await?;
    db.execute(builder.build(&invitation_code_table)).await?;

    Ok(())
}
