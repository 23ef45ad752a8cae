//! Places web-service response types.
//!
//! Every response carries a top-level `status` string (`"OK"`,
//! `"ZERO_RESULTS"`, `"REQUEST_DENIED"`, ...) and an optional
//! `error_message` alongside the payload.

use serde::Deserialize;

/// Status value for a successful request.
pub const STATUS_OK: &str = "OK";
/// Status value for a successful request that matched nothing.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Fields requested from the details endpoint.
pub const DETAIL_FIELDS: &[&str] = &[
    "name",
    "vicinity",
    "geometry",
    "formatted_phone_number",
    "business_status",
    "opening_hours",
    "photos",
    "types",
];

// ---------------------------------------------------------------------------
// nearbysearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

/// One match from a nearby search.
///
/// `place_id` is optional on the wire so a single malformed entry does not
/// fail the whole page; entries without it are skipped during normalization.
#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
}
