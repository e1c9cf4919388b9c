//! Store category classification.
//!
//! Partner stores carry a free-text type string ("Italian Restaurant",
//! "Coffee & Desserts") maintained outside this application. Everything that
//! needs a category — submission creation, badge counting, catalog screen
//! filters — goes through the single [`classify`] function here so the
//! heuristic cannot drift between call sites.

use crate::entities::submission::StoreCategory;

/// Substrings that classify a type string as a restaurant.
/// Checked before the cafe keywords, so "Italian Restaurant & Cafe" lands
/// on restaurant.
const RESTAURANT_KEYWORDS: &[&str] = &["restaurant", "food", "steak", "bbq"];

/// Substrings that classify a type string as a cafe.
const CAFE_KEYWORDS: &[&str] = &["coffee", "cafe", "dessert", "bakery", "tea"];

/// Classifies a store's free-text type string into a fixed category.
///
/// Matching is case-insensitive substring containment. The heuristic is
/// lossy on purpose: a type string matching no keyword always falls into
/// [`StoreCategory::Others`].
#[must_use]
pub fn classify(store_type: &str) -> StoreCategory {
    let lowered = store_type.to_lowercase();

    if RESTAURANT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        StoreCategory::Restaurant
    } else if CAFE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        StoreCategory::Cafe
    } else {
        StoreCategory::Others
    }
}
