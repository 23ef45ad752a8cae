use super::*;
use std::sync::Mutex;
use std::time::Duration;

use sweekar_core::DEFAULT_CENTER;

use crate::location::{ChannelGeolocator, LocationError, LocationSettings, UnavailableGeolocator};
use crate::pipeline::CycleState::{Abandoned, Fetching, Filtering, LocationPending, Published};
use crate::pipeline::DiscoverySettings;
use crate::testing::{detail, raw, FakePlaces};

fn profile() -> CategoryProfile {
    CategoryProfile {
        keywords: vec!["k".to_string()],
        acceptable_types: Vec::new(),
    }
}

fn pipeline(fake: FakePlaces) -> Arc<DiscoveryPipeline> {
    Arc::new(DiscoveryPipeline::new(
        Arc::new(fake),
        DiscoverySettings::default(),
    ))
}

fn one_place() -> FakePlaces {
    FakePlaces::new()
        .with_search("k", vec![raw("P")])
        .with_detail(detail("P", DEFAULT_CENTER, &[]))
}

#[tokio::test(start_paused = true)]
async fn publishes_for_first_fix() {
    let (geo, tx) = ChannelGeolocator::new(8);
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(pipeline(one_place()), profile(), location);
    let mut rx = session.subscribe();

    tx.send(Ok(DEFAULT_CENTER)).await.unwrap();
    let published = rx.wait_for(Option::is_some).await.unwrap().clone().unwrap();

    assert_eq!(published.cycle, 1);
    assert_eq!(published.origin, DEFAULT_CENTER);
    assert_eq!(published.resources.len(), 1);
    assert_eq!(session.state(), CycleState::Published);
}

#[tokio::test(start_paused = true)]
async fn denied_permission_publishes_for_default_center() {
    let (geo, tx) = ChannelGeolocator::new(8);
    tx.send(Err(LocationError::PermissionDenied)).await.unwrap();
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(pipeline(one_place()), profile(), location);
    let mut rx = session.subscribe();

    let published = rx.wait_for(Option::is_some).await.unwrap().clone().unwrap();
    assert_eq!(published.origin, DEFAULT_CENTER);
    assert_eq!(published.resources.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_capability_publishes_for_default_center() {
    let location = LocationWatch::start(&UnavailableGeolocator, LocationSettings::default());
    let session = DiscoverySession::start(pipeline(one_place()), profile(), location);
    let mut rx = session.subscribe();

    let published = rx.wait_for(Option::is_some).await.unwrap().clone().unwrap();
    assert_eq!(published.origin, DEFAULT_CENTER);
}

#[tokio::test(start_paused = true)]
async fn newer_location_abandons_in_flight_cycle() {
    let moved = DEFAULT_CENTER.offset_north(500.0);
    let fake = Arc::new(one_place().with_detail_delay(Duration::from_secs(1)));
    let (geo, tx) = ChannelGeolocator::new(8);
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(
        Arc::new(DiscoveryPipeline::new(fake.clone(), DiscoverySettings::default())),
        profile(),
        location,
    );
    let mut rx = session.subscribe();
    let mut states = session.subscribe_state();

    tx.send(Ok(DEFAULT_CENTER)).await.unwrap();
    states
        .wait_for(|s| *s == CycleState::Fetching)
        .await
        .unwrap();

    // Halfway through the first cycle's detail lookups.
    tokio::time::sleep(Duration::from_millis(500)).await;
    tx.send(Ok(moved)).await.unwrap();

    // Past the point where the first cycle would have finished.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(!rx.has_changed().unwrap(), "abandoned cycle must not publish");

    rx.changed().await.unwrap();
    let published = rx.borrow_and_update().clone().unwrap();
    assert_eq!(published.origin, moved);
    assert_eq!(published.cycle, 2);
    assert_eq!(fake.search_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn small_movement_does_not_start_new_cycle() {
    let fake = Arc::new(one_place());
    let (geo, tx) = ChannelGeolocator::new(8);
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(
        Arc::new(DiscoveryPipeline::new(fake.clone(), DiscoverySettings::default())),
        profile(),
        location,
    );
    let mut rx = session.subscribe();

    tx.send(Ok(DEFAULT_CENTER)).await.unwrap();
    rx.wait_for(Option::is_some).await.unwrap();

    tx.send(Ok(DEFAULT_CENTER.offset_north(99.0))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!rx.has_changed().unwrap());
    assert_eq!(fake.search_calls(), 1);
    assert_eq!(session.latest().map(|p| p.cycle), Some(1));
}

#[tokio::test(start_paused = true)]
async fn later_cycle_replaces_published_list() {
    let far = DEFAULT_CENTER.offset_north(20_000.0);
    let (geo, tx) = ChannelGeolocator::new(8);
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(pipeline(one_place()), profile(), location);
    let mut rx = session.subscribe();

    tx.send(Ok(DEFAULT_CENTER)).await.unwrap();
    rx.wait_for(|p| p.as_ref().is_some_and(|p| p.cycle == 1))
        .await
        .unwrap();

    tx.send(Ok(far)).await.unwrap();
    let second = rx
        .wait_for(|p| p.as_ref().is_some_and(|p| p.cycle == 2))
        .await
        .unwrap()
        .clone()
        .unwrap();

    assert_eq!(second.origin, far);
    // The only place is 20 km from the new origin.
    assert!(second.resources.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_session() {
    let (geo, _tx) = ChannelGeolocator::new(8);
    let location = LocationWatch::start(&geo, LocationSettings::default());
    let session = DiscoverySession::start(pipeline(one_place()), profile(), location);

    session.cancel();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(session.is_finished());
    assert!(session.latest().is_none());
}

/// `coordinate` driven directly, with every reported state recorded.
struct Recorded {
    coords: watch::Sender<Option<Coordinate>>,
    resources: watch::Receiver<Option<PublishedResources>>,
    seen: Arc<Mutex<Vec<CycleState>>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Recorded {
    fn start(pipeline: Arc<DiscoveryPipeline>) -> Self {
        let (coords_tx, coords) = watch::channel(None);
        let (resources_tx, resources) = watch::channel(None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancellationToken::new();
        let log = Arc::clone(&seen);
        let task = tokio::spawn(coordinate(
            pipeline,
            profile(),
            coords,
            resources_tx,
            move |state: CycleState| log.lock().unwrap().push(state),
            cancel.clone(),
        ));
        Self {
            coords: coords_tx,
            resources,
            seen,
            cancel,
            task,
        }
    }

    async fn stop(self) -> Vec<CycleState> {
        self.cancel.cancel();
        self.task.await.unwrap();
        let seen = self.seen.lock().unwrap().clone();
        seen
    }
}

#[tokio::test(start_paused = true)]
async fn every_cycle_starts_with_location_pending() {
    let far = DEFAULT_CENTER.offset_north(20_000.0);
    let mut run = Recorded::start(pipeline(one_place()));

    run.coords.send_replace(Some(DEFAULT_CENTER));
    run.resources
        .wait_for(|p| p.as_ref().is_some_and(|p| p.cycle == 1))
        .await
        .unwrap();
    run.coords.send_replace(Some(far));
    run.resources
        .wait_for(|p| p.as_ref().is_some_and(|p| p.cycle == 2))
        .await
        .unwrap();

    assert_eq!(
        run.stop().await,
        vec![
            LocationPending,
            Fetching,
            Filtering,
            Published,
            LocationPending,
            Fetching,
            Filtering,
            Published,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_cycle_returns_to_location_pending() {
    let moved = DEFAULT_CENTER.offset_north(500.0);
    let slow = one_place().with_detail_delay(Duration::from_secs(1));
    let mut run = Recorded::start(pipeline(slow));

    run.coords.send_replace(Some(DEFAULT_CENTER));
    tokio::time::sleep(Duration::from_millis(500)).await;
    run.coords.send_replace(Some(moved));
    let published = run
        .resources
        .wait_for(Option::is_some)
        .await
        .unwrap()
        .clone()
        .unwrap();
    assert_eq!(published.cycle, 2);

    assert_eq!(
        run.stop().await,
        vec![
            LocationPending,
            Fetching,
            Abandoned,
            LocationPending,
            Fetching,
            Filtering,
            Published,
        ]
    );
}
