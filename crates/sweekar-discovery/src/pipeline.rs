//! One discovery cycle: fan out keyword searches, deduplicate, enrich, and
//! filter by type and distance.

use std::sync::Arc;

use serde::Serialize;
use sweekar_core::{AppConfig, CategoryProfile, Coordinate, PlaceDetail};
use sweekar_places::PlacesBackend;

use crate::dedup::dedup_places;
use crate::enrich::enrich_all;
use crate::fanout::search_all;
use crate::filter::filter_resources;
use crate::location::{locate_once, Geolocator, LocationSettings};

#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Radius passed to nearby search and enforced again after enrichment.
    pub search_radius_m: f64,
    /// Upper bound on backend requests in flight within one stage.
    pub max_concurrent_requests: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            search_radius_m: 10_000.0,
            max_concurrent_requests: 16,
        }
    }
}

impl DiscoverySettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            search_radius_m: config.search_radius_m,
            max_concurrent_requests: config.max_concurrent_requests,
        }
    }
}

/// Where a discovery session is in its current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Idle,
    LocationPending,
    Fetching,
    Filtering,
    Published,
    /// A newer location arrived before this cycle finished; its results were
    /// discarded.
    Abandoned,
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CycleState::Idle => "idle",
            CycleState::LocationPending => "location_pending",
            CycleState::Fetching => "fetching",
            CycleState::Filtering => "filtering",
            CycleState::Published => "published",
            CycleState::Abandoned => "abandoned",
        };
        f.write_str(label)
    }
}

/// The result of one completed cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedResources {
    /// 1-based sequence number within the session.
    pub cycle: u64,
    pub origin: Coordinate,
    pub resources: Vec<PlaceDetail>,
}

/// Runs discovery cycles against a places backend.
pub struct DiscoveryPipeline {
    backend: Arc<dyn PlacesBackend>,
    settings: DiscoverySettings,
}

impl DiscoveryPipeline {
    #[must_use]
    pub fn new(backend: Arc<dyn PlacesBackend>, settings: DiscoverySettings) -> Self {
        Self { backend, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    /// Runs one full cycle for `origin`.
    ///
    /// Backend failures never fail the cycle: a failed keyword or detail
    /// lookup only shrinks the result.
    pub async fn run_cycle(&self, origin: Coordinate, profile: &CategoryProfile) -> Vec<PlaceDetail> {
        self.run_cycle_reporting(origin, profile, &|_: CycleState| {}).await
    }

    pub(crate) async fn run_cycle_reporting(
        &self,
        origin: Coordinate,
        profile: &CategoryProfile,
        report: &(dyn Fn(CycleState) + Sync),
    ) -> Vec<PlaceDetail> {
        let backend = self.backend.as_ref();
        let radius_m = self.settings.search_radius_m;
        let limit = self.settings.max_concurrent_requests;

        report(CycleState::Fetching);
        tracing::info!(%origin, keywords = profile.keywords.len(), "discovery cycle started");

        let raw = search_all(backend, origin, radius_m, &profile.keywords, limit).await;
        let unique = dedup_places(raw);
        let details = enrich_all(backend, &unique, limit).await;

        report(CycleState::Filtering);
        let enriched = details.len();
        let resources = filter_resources(details, profile, origin, radius_m);

        tracing::info!(
            %origin,
            unique = unique.len(),
            enriched,
            kept = resources.len(),
            "discovery cycle complete"
        );
        resources
    }
}

/// Resolves the current location once and runs a single cycle for it.
pub async fn discover_once(
    pipeline: &DiscoveryPipeline,
    geolocator: &dyn Geolocator,
    location: &LocationSettings,
    profile: &CategoryProfile,
) -> PublishedResources {
    let origin = locate_once(geolocator, location).await;
    let resources = pipeline.run_cycle(origin, profile).await;
    PublishedResources {
        cycle: 1,
        origin,
        resources,
    }
}
