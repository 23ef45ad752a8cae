//! Category type and search-radius filtering of enriched places.

use sweekar_core::{within_m, CategoryProfile, Coordinate, PlaceDetail};

/// Keeps a place when its types satisfy the category and it lies within
/// `radius_m` of `origin`. Order is preserved.
#[must_use]
pub fn filter_resources(
    details: Vec<PlaceDetail>,
    profile: &CategoryProfile,
    origin: Coordinate,
    radius_m: f64,
) -> Vec<PlaceDetail> {
    details
        .into_iter()
        .filter(|d| {
            if !profile.accepts_types(&d.types) {
                tracing::trace!(place_id = %d.place_id, types = ?d.types, "rejected by type");
                return false;
            }
            if !within_m(origin, d.location, radius_m) {
                tracing::trace!(place_id = %d.place_id, "rejected by distance");
                return false;
            }
            true
        })
        .collect()
}
