//! Partner store catalog reader.
//!
//! Merchant listings live in an externally managed document collection and
//! are read-only here. Records arrive with whatever fields the upstream
//! editor filled in: missing or malformed values are silently defaulted
//! (numbers to zero, strings to empty) rather than surfaced as errors, so a
//! half-filled listing still renders. Grouping and category filtering are
//! pure functions over the fetched list.

use crate::{core::category::classify, entities::submission::StoreCategory, errors::Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One merchant listing from the document collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerStore {
    /// Document id
    #[serde(default)]
    pub id: String,
    /// Display name of the store
    #[serde(default)]
    pub name: String,
    /// Free-text store type, e.g. `"Italian Restaurant"`; categories are
    /// derived from it via [`classify`]
    #[serde(default, rename = "type")]
    pub store_type: String,
    /// City the store is in, verbatim as entered upstream
    #[serde(default)]
    pub city: String,
    /// Latitude of the store location
    #[serde(default)]
    pub latitude: f64,
    /// Longitude of the store location
    #[serde(default)]
    pub longitude: f64,
    /// Aggregate rating, 0 when unrated
    #[serde(default)]
    pub rating: f64,
    /// Listing image URL
    #[serde(default)]
    pub image_url: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
}

/// Stores of one city, in the order they appeared in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGroup {
    /// City key, taken verbatim from the records (no normalization)
    pub city: String,
    /// The city's stores in collection order
    pub stores: Vec<PartnerStore>,
}

/// Parses a JSON document collection into store records.
///
/// A record that fails to deserialize as a whole is replaced by an
/// all-default record; only a collection that is not a JSON array at all is
/// an error.
pub fn parse_collection(json: &str) -> Result<Vec<PartnerStore>> {
    let documents: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(documents
        .into_iter()
        .map(|doc| serde_json::from_value(doc).unwrap_or_default())
        .collect())
}

/// Reads the entire catalog in one call.
pub fn fetch_all(path: impl AsRef<Path>) -> Result<Vec<PartnerStore>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let stores = parse_collection(&contents)?;
    debug!(count = stores.len(), "Fetched partner store catalog");
    Ok(stores)
}

/// Groups stores by city, preserving the order cities and stores first
/// appear in. City keys are compared verbatim, so differently cased
/// spellings form separate groups.
#[must_use]
pub fn group_by_city(stores: &[PartnerStore]) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();
    for store in stores {
        match groups.iter_mut().find(|g| g.city == store.city) {
            Some(group) => group.stores.push(store.clone()),
            None => groups.push(CityGroup {
                city: store.city.clone(),
                stores: vec![store.clone()],
            }),
        }
    }
    groups
}

/// The stores whose type string classifies into the given category. Uses
/// the same classifier as submission creation.
#[must_use]
pub fn filter_by_category(stores: &[PartnerStore], category: StoreCategory) -> Vec<PartnerStore> {
    stores
        .iter()
        .filter(|s| classify(&s.store_type) == category)
        .cloned()
        .collect()
}
