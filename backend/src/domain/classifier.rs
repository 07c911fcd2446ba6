//! Keyword and substring rules that interpret a free-text query.
//!
//! Matching is plain lowercase substring containment. There is no
//! tokenisation, stemming, or scoring: "wherever" counts as "where" and the
//! first location in store order wins.

use super::location::Location;

/// Phrases that mark a query as asking for directions.
pub const LOCATION_KEYWORDS: &[&str] = &[
    "where",
    "find",
    "located",
    "location",
    "direction",
    "how to get",
    "where is",
];

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryClassification {
    /// Query contains at least one of [`LOCATION_KEYWORDS`].
    pub is_location_query: bool,
    /// First known location whose id or name appears in the query.
    ///
    /// Can be set even when `is_location_query` is false.
    pub matched: Option<Location>,
}

/// Classify `query` against `locations`, which must be in store order.
///
/// # Examples
/// ```
/// use campus_guide::domain::{CampusSeed, classify};
///
/// let seed = CampusSeed::builtin().unwrap();
/// let result = classify("Where is the library?", &seed.locations);
/// assert!(result.is_location_query);
/// assert_eq!(result.matched.unwrap().id().as_str(), "library");
/// ```
pub fn classify(query: &str, locations: &[Location]) -> QueryClassification {
    let lowered = query.to_lowercase();
    let is_location_query = LOCATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword));
    let matched = locations
        .iter()
        .find(|location| {
            lowered.contains(&location.id().as_str().to_lowercase())
                || lowered.contains(&location.name().to_lowercase())
        })
        .cloned();
    QueryClassification {
        is_location_query,
        matched,
    }
}
