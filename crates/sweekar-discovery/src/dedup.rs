//! First-seen-wins deduplication.

use std::collections::HashSet;
use std::hash::Hash;

use sweekar_core::RawPlace;

/// Keeps the first item for each key, preserving input order.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Removes places already seen under the same `place_id`.
#[must_use]
pub fn dedup_places(places: Vec<RawPlace>) -> Vec<RawPlace> {
    let before = places.len();
    let unique = dedup_by_key(places, |p| p.place_id.clone());
    tracing::debug!(before, after = unique.len(), "deduplicated places");
    unique
}
