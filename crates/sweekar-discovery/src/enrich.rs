//! Detail enrichment: one details lookup per unique place.

use futures::stream::{self, StreamExt};
use sweekar_core::{PlaceDetail, RawPlace};
use sweekar_places::PlacesBackend;

/// Fetches details for every place, dropping the ones whose lookup fails.
///
/// Output keeps the order of `places`.
pub async fn enrich_all(
    backend: &dyn PlacesBackend,
    places: &[RawPlace],
    max_concurrent: usize,
) -> Vec<PlaceDetail> {
    let details: Vec<Option<PlaceDetail>> = stream::iter(places.iter().cloned())
        .map(|place: RawPlace| async move {
            match backend.place_details(&place.place_id).await {
                Ok(detail) => Some(detail),
                Err(e) => {
                    tracing::warn!(
                        place_id = %place.place_id,
                        name = %place.name,
                        error = %e,
                        "place details failed; dropping place"
                    );
                    None
                }
            }
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let enriched: Vec<PlaceDetail> = details.into_iter().flatten().collect();
    tracing::debug!(requested = places.len(), enriched = enriched.len(), "enrichment complete");
    enriched
}
