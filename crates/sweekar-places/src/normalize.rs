//! Conversion of places wire types into the domain records used by the
//! discovery pipeline.

use sweekar_core::resource::NOT_AVAILABLE;
use sweekar_core::{Coordinate, OpenStatus, PlaceDetail, RawPlace};

use crate::error::PlacesError;
use crate::types::{LatLng, NearbyResult, PlaceDetailsResult};

fn coordinate(loc: LatLng) -> Coordinate {
    Coordinate::new(loc.lat, loc.lng)
}

/// Converts one nearby-search entry into a [`RawPlace`].
///
/// Returns `None` when the entry has no `place_id`.
#[must_use]
pub fn raw_place(result: NearbyResult) -> Option<RawPlace> {
    let place_id = result.place_id.filter(|id| !id.is_empty())?;
    Some(RawPlace {
        name: result.name.unwrap_or_default(),
        vicinity: result.vicinity,
        location: result.geometry.map(|g| coordinate(g.location)),
        place_id,
    })
}

/// Resolves open/closed from the current-hours flag alone. Places without
/// opening hours count as closed.
#[must_use]
pub fn open_status(result: &PlaceDetailsResult) -> OpenStatus {
    match result.opening_hours.as_ref().and_then(|h| h.open_now) {
        Some(true) => OpenStatus::Open,
        _ => OpenStatus::Closed,
    }
}

/// Converts a details response into a [`PlaceDetail`].
///
/// `photo_url` is the already-resolved URL for the first photo, if any.
///
/// # Errors
///
/// Returns [`PlacesError::MissingField`] when the record has no coordinates,
/// since radius filtering cannot be applied without them.
pub fn place_detail(
    place_id: &str,
    result: PlaceDetailsResult,
    photo_url: Option<String>,
) -> Result<PlaceDetail, PlacesError> {
    let status = open_status(&result);
    let location = result
        .geometry
        .map(|g| coordinate(g.location))
        .ok_or_else(|| PlacesError::MissingField {
            place_id: place_id.to_string(),
            field: "geometry",
        })?;

    let hours = result
        .opening_hours
        .map(|h| h.weekday_text)
        .unwrap_or_default();

    Ok(PlaceDetail {
        place_id: place_id.to_string(),
        name: result.name.unwrap_or_default(),
        address: result
            .vicinity
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        location,
        phone: result.formatted_phone_number.filter(|p| !p.trim().is_empty()),
        email: None,
        status,
        hours,
        photo_url,
        types: result.types,
    })
}
