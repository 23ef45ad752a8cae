//! The places backend contract consumed by the discovery pipeline.

use async_trait::async_trait;
use sweekar_core::{Coordinate, PlaceDetail, RawPlace};

use crate::client::{PlacesClient, PHOTO_MAX_HEIGHT, PHOTO_MAX_WIDTH};
use crate::error::PlacesError;
use crate::normalize;

/// Keyword-scoped nearby search and place-detail lookup.
///
/// Implementations return domain records; the pipeline decides what a
/// failure means for the batch.
#[async_trait]
pub trait PlacesBackend: Send + Sync {
    /// Places matching `keyword` within `radius_m` of `origin`.
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
    ) -> Result<Vec<RawPlace>, PlacesError>;

    /// Enriched record for one place, with its photo resolved to a URL.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError>;
}

#[async_trait]
impl PlacesBackend for PlacesClient {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let results = self.search_nearby(origin, radius_m, keyword).await?;
        let total = results.len();
        let places: Vec<RawPlace> = results
            .into_iter()
            .filter_map(normalize::raw_place)
            .collect();
        if places.len() < total {
            tracing::debug!(
                keyword,
                skipped = total - places.len(),
                "nearby results without place_id skipped"
            );
        }
        Ok(places)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let result = self.get_place_details(place_id).await?;
        let photo_url = match result.photos.first() {
            Some(photo) => Some(self.photo_url(
                &photo.photo_reference,
                PHOTO_MAX_WIDTH,
                PHOTO_MAX_HEIGHT,
            )?),
            None => None,
        };
        normalize::place_detail(place_id, result, photo_url)
    }
}
