//! Keyword fan-out: one nearby search per keyword, joined before dedup.

use futures::stream::{self, StreamExt};
use sweekar_core::{Coordinate, RawPlace};
use sweekar_places::PlacesBackend;

/// Runs one nearby search per keyword and concatenates the results in
/// keyword order.
///
/// At most `max_concurrent` searches are in flight at once. A keyword whose
/// search fails contributes nothing; the failure is logged and the remaining
/// keywords are unaffected.
pub async fn search_all(
    backend: &dyn PlacesBackend,
    origin: Coordinate,
    radius_m: f64,
    keywords: &[String],
    max_concurrent: usize,
) -> Vec<RawPlace> {
    // Items must be owned: per-item futures over borrowed keywords fail the
    // `Send` check once the cycle runs in a spawned task.
    let per_keyword: Vec<Vec<RawPlace>> = stream::iter(keywords.iter().cloned())
        .map(|keyword: String| async move {
            match backend.nearby_search(origin, radius_m, &keyword).await {
                Ok(places) => {
                    tracing::debug!(keyword = %keyword, count = places.len(), "nearby search complete");
                    places
                }
                Err(e) => {
                    tracing::warn!(keyword = %keyword, error = %e, "nearby search failed; skipping keyword");
                    Vec::new()
                }
            }
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    per_keyword.into_iter().flatten().collect()
}
