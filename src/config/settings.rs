//! Application settings loading from `stampbook.toml`.
//!
//! Settings cover the two filesystem locations the crate needs: the media
//! root backing the object store and the catalog document file. Every field
//! has a default, and a missing settings file simply yields the defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The entire `stampbook.toml` file.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Object storage settings
    #[serde(default)]
    pub storage: StorageSettings,
    /// Partner store catalog settings
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// `[storage]` section.
#[derive(Debug, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Directory the filesystem object store keeps its buckets under
    #[serde(default = "default_media_root")]
    pub media_root: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            media_root: default_media_root(),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CatalogSettings {
    /// Path of the partner store document collection
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_media_root() -> String {
    "data/media".to_string()
}

fn default_catalog_path() -> String {
    "data/stores.json".to_string()
}

/// Loads settings from a TOML file. A missing file yields the defaults;
/// an unreadable or unparsable file is an error.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from the default location (`./stampbook.toml`).
pub fn load_default_settings() -> Result<AppSettings> {
    load_settings("stampbook.toml")
}
