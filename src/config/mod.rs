/// Database connection and table creation
pub mod database;

/// Application settings from `stampbook.toml`
pub mod settings;
