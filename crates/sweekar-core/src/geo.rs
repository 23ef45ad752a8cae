//! Great-circle geometry on a spherical earth.
//!
//! All distances are in meters and computed with the haversine formula
//! against the mean earth radius. No ellipsoidal correction is applied.

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Fallback query location: the geographic center of India.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 20.5937,
    lng: 78.9629,
};

/// Slack applied to distance comparisons so that a point constructed at
/// exactly a limit is not rejected by floating-point rounding.
pub const DISTANCE_TOLERANCE_M: f64 = 1e-6;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in meters.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_m(*self, *other)
    }

    /// Returns a coordinate `meters` due north of `self`.
    ///
    /// Moving along a meridian keeps the haversine distance equal to the arc
    /// length, which makes this handy for building exact-distance fixtures.
    #[must_use]
    pub fn offset_north(&self, meters: f64) -> Self {
        Self {
            lat: self.lat + (meters / EARTH_RADIUS_M).to_degrees(),
            lng: self.lng,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Great-circle distance between two coordinates in meters.
#[must_use]
pub fn haversine_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// `true` when `to` lies within `limit_m` meters of `from` (inclusive).
#[must_use]
pub fn within_m(from: Coordinate, to: Coordinate, limit_m: f64) -> bool {
    haversine_m(from, to) <= limit_m + DISTANCE_TOLERANCE_M
}
