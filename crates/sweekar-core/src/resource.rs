//! Place records flowing through the discovery pipeline.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Placeholder shown when a text field is unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// A place returned by a keyword search, before detail enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlace {
    /// Backend-assigned identifier; the identity key for a place.
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub location: Option<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenStatus {
    Open,
    Closed,
}

impl std::fmt::Display for OpenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenStatus::Open => write!(f, "Open"),
            OpenStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A fully enriched support resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: OpenStatus,
    /// One entry per weekday, as supplied by the backend.
    pub hours: Vec<String>,
    pub photo_url: Option<String>,
    pub types: Vec<String>,
}

impl PlaceDetail {
    /// Weekly hours joined into a single line, or `"N/A"`.
    #[must_use]
    pub fn hours_display(&self) -> String {
        if self.hours.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.hours.join(", ")
        }
    }

    #[must_use]
    pub fn phone_display(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> PlaceDetail {
        PlaceDetail {
            place_id: "p1".to_string(),
            name: "City Women's Clinic".to_string(),
            address: "12 MG Road".to_string(),
            location: Coordinate::new(12.97, 77.59),
            phone: None,
            email: None,
            status: OpenStatus::Closed,
            hours: Vec::new(),
            photo_url: None,
            types: vec!["health".to_string()],
        }
    }

    #[test]
    fn missing_fields_display_as_not_available() {
        let d = detail();
        assert_eq!(d.hours_display(), "N/A");
        assert_eq!(d.phone_display(), "N/A");
        assert_eq!(d.email_display(), "N/A");
    }

    #[test]
    fn hours_are_joined_with_comma() {
        let mut d = detail();
        d.hours = vec![
            "Monday: 9 AM – 5 PM".to_string(),
            "Tuesday: Closed".to_string(),
        ];
        assert_eq!(d.hours_display(), "Monday: 9 AM – 5 PM, Tuesday: Closed");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(OpenStatus::Open).unwrap();
        assert_eq!(json, "open");
        assert_eq!(OpenStatus::Closed.to_string(), "Closed");
    }
}
