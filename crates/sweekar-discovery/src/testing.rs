//! In-memory places backend and record builders for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sweekar_core::{Coordinate, OpenStatus, PlaceDetail, RawPlace, DEFAULT_CENTER};
use sweekar_places::{PlacesBackend, PlacesError};

pub(crate) fn raw(place_id: &str) -> RawPlace {
    raw_named(place_id, place_id)
}

pub(crate) fn raw_named(place_id: &str, name: &str) -> RawPlace {
    RawPlace {
        place_id: place_id.to_string(),
        name: name.to_string(),
        vicinity: None,
        location: Some(DEFAULT_CENTER),
    }
}

pub(crate) fn detail(place_id: &str, location: Coordinate, types: &[&str]) -> PlaceDetail {
    PlaceDetail {
        place_id: place_id.to_string(),
        name: format!("Resource {place_id}"),
        address: "N/A".to_string(),
        location,
        phone: None,
        email: None,
        status: OpenStatus::Closed,
        hours: Vec::new(),
        photo_url: None,
        types: types.iter().map(ToString::to_string).collect(),
    }
}

enum SearchOutcome {
    Places(Vec<RawPlace>),
    Error(String),
}

/// Scripted backend: keyword → results or API error, place id → detail.
///
/// Unknown keywords answer with an empty list; unknown place ids fail with
/// `NOT_FOUND`.
#[derive(Default)]
pub(crate) struct FakePlaces {
    searches: HashMap<String, SearchOutcome>,
    search_delays: HashMap<String, Duration>,
    details: HashMap<String, PlaceDetail>,
    detail_delay: Option<Duration>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakePlaces {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_search(mut self, keyword: &str, places: Vec<RawPlace>) -> Self {
        self.searches
            .insert(keyword.to_string(), SearchOutcome::Places(places));
        self
    }

    pub(crate) fn with_search_error(mut self, keyword: &str, status: &str) -> Self {
        self.searches
            .insert(keyword.to_string(), SearchOutcome::Error(status.to_string()));
        self
    }

    pub(crate) fn with_search_delay(mut self, keyword: &str, delay: Duration) -> Self {
        self.search_delays.insert(keyword.to_string(), delay);
        self
    }

    pub(crate) fn with_detail(mut self, detail: PlaceDetail) -> Self {
        self.details.insert(detail.place_id.clone(), detail);
        self
    }

    pub(crate) fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = Some(delay);
        self
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesBackend for FakePlaces {
    async fn nearby_search(
        &self,
        _origin: Coordinate,
        _radius_m: f64,
        keyword: &str,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.search_delays.get(keyword) {
            tokio::time::sleep(*delay).await;
        }
        match self.searches.get(keyword) {
            Some(SearchOutcome::Places(places)) => Ok(places.clone()),
            Some(SearchOutcome::Error(status)) => Err(PlacesError::Api {
                status: status.clone(),
                message: format!("scripted failure for {keyword}"),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.detail_delay {
            tokio::time::sleep(delay).await;
        }
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| PlacesError::Api {
                status: "NOT_FOUND".to_string(),
                message: String::new(),
            })
    }
}
