//! Location source: one-shot and continuous position fixes with a fallback
//! coordinate, so discovery never blocks on a location that may not arrive.

use std::time::Duration;

use async_trait::async_trait;
use sweekar_core::{AppConfig, Coordinate, DEFAULT_CENTER};
use thiserror::Error;
use tokio::sync::{mpsc, watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::throttle::RefetchThrottle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("timed out waiting for a position fix")]
    Timeout,
}

pub type PositionFix = Result<Coordinate, LocationError>;

/// The device's geolocation capability.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// A single position fix.
    async fn current_position(&self) -> PositionFix;

    /// A stream of fixes, or `None` when the platform has no location
    /// capability at all.
    fn watch_position(&self) -> Option<mpsc::Receiver<PositionFix>>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinate);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> PositionFix {
        Ok(self.0)
    }

    fn watch_position(&self) -> Option<mpsc::Receiver<PositionFix>> {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 and a fresh channel: this send cannot fail.
        let _ = tx.try_send(Ok(self.0));
        Some(rx)
    }
}

/// A platform without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGeolocator;

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> PositionFix {
        Err(LocationError::Unavailable)
    }

    fn watch_position(&self) -> Option<mpsc::Receiver<PositionFix>> {
        None
    }
}

/// Fixes pushed in by the embedding application through a channel.
///
/// The stream can be handed to one watcher; once taken, one-shot requests
/// report [`LocationError::Unavailable`]. A one-shot request that is dropped
/// mid-wait (for example by a timeout) leaves the stream in place.
#[derive(Debug)]
pub struct ChannelGeolocator {
    receiver: AsyncMutex<Option<mpsc::Receiver<PositionFix>>>,
}

impl ChannelGeolocator {
    /// Returns the geolocator and the sender used to feed it fixes.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Sender<PositionFix>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (
            Self {
                receiver: AsyncMutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl Geolocator for ChannelGeolocator {
    async fn current_position(&self) -> PositionFix {
        let mut slot = self.receiver.lock().await;
        match slot.as_mut() {
            // `recv` is cancel-safe and the receiver never leaves the slot.
            Some(rx) => rx.recv().await.unwrap_or(Err(LocationError::Unavailable)),
            None => Err(LocationError::Unavailable),
        }
    }

    /// `None` once the stream has been taken, or while a one-shot request
    /// is waiting on it.
    fn watch_position(&self) -> Option<mpsc::Receiver<PositionFix>> {
        self.receiver.try_lock().ok().and_then(|mut slot| slot.take())
    }
}

#[derive(Debug, Clone)]
pub struct LocationSettings {
    /// Minimum movement before a new fix is dispatched.
    pub refetch_distance_m: f64,
    /// How long to wait for the first fix before using `fallback`.
    pub fix_timeout: Duration,
    pub fallback: Coordinate,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            refetch_distance_m: 100.0,
            fix_timeout: Duration::from_millis(5_000),
            fallback: DEFAULT_CENTER,
        }
    }
}

impl LocationSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            refetch_distance_m: config.refetch_distance_m,
            fix_timeout: Duration::from_millis(config.location_timeout_ms),
            fallback: DEFAULT_CENTER,
        }
    }
}

/// Resolves a single coordinate, substituting the fallback on error or
/// timeout.
pub async fn locate_once(geolocator: &dyn Geolocator, settings: &LocationSettings) -> Coordinate {
    match tokio::time::timeout(settings.fix_timeout, geolocator.current_position()).await {
        Ok(Ok(fix)) => fix,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, fallback = %settings.fallback, "geolocation failed; using default location");
            settings.fallback
        }
        Err(_) => {
            tracing::warn!(
                timeout = ?settings.fix_timeout,
                fallback = %settings.fallback,
                "geolocation timed out; using default location"
            );
            settings.fallback
        }
    }
}

/// A running position watch.
///
/// Dispatched coordinates are published through a single-latest-value
/// channel; intermediate fixes a slow consumer never observed are dropped.
/// Dropping the handle or calling [`LocationWatch::cancel`] stops the watch.
pub struct LocationWatch {
    coords: watch::Receiver<Option<Coordinate>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LocationWatch {
    /// Starts watching `geolocator`. Must be called within a Tokio runtime.
    #[must_use]
    pub fn start(geolocator: &dyn Geolocator, settings: LocationSettings) -> Self {
        let (tx, coords) = watch::channel(None);
        let cancel = CancellationToken::new();
        let fixes = geolocator.watch_position();
        let task = tokio::spawn(run_watch(fixes, tx, settings, cancel.clone()));
        Self {
            coords,
            cancel,
            task,
        }
    }

    /// A receiver for dispatched coordinates. A value dispatched before the
    /// call is reported as unseen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Coordinate>> {
        self.coords.clone()
    }

    /// The most recently dispatched coordinate.
    #[must_use]
    pub fn latest(&self) -> Option<Coordinate> {
        *self.coords.borrow()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn dispatch(
    throttle: &mut RefetchThrottle,
    tx: &watch::Sender<Option<Coordinate>>,
    fix: Coordinate,
) {
    if throttle.observe(fix) {
        tracing::debug!(%fix, "location dispatched");
        tx.send_replace(Some(fix));
    } else {
        tracing::trace!(%fix, "location change below refetch distance");
    }
}

async fn run_watch(
    fixes: Option<mpsc::Receiver<PositionFix>>,
    tx: watch::Sender<Option<Coordinate>>,
    settings: LocationSettings,
    cancel: CancellationToken,
) {
    let mut throttle = RefetchThrottle::new(settings.refetch_distance_m);

    let Some(mut fixes) = fixes else {
        tracing::warn!(fallback = %settings.fallback, "geolocation not supported; using default location");
        dispatch(&mut throttle, &tx, settings.fallback);
        cancel.cancelled().await;
        return;
    };

    let first = tokio::select! {
        () = cancel.cancelled() => return,
        first = tokio::time::timeout(settings.fix_timeout, fixes.recv()) => first,
    };

    match first {
        Ok(Some(Ok(fix))) => dispatch(&mut throttle, &tx, fix),
        Ok(Some(Err(e))) => {
            tracing::warn!(error = %e, fallback = %settings.fallback, "geolocation failed; using default location");
            dispatch(&mut throttle, &tx, settings.fallback);
        }
        Ok(None) => {
            tracing::warn!(fallback = %settings.fallback, "position stream closed before first fix; using default location");
            dispatch(&mut throttle, &tx, settings.fallback);
        }
        Err(_) => {
            tracing::warn!(
                timeout = ?settings.fix_timeout,
                fallback = %settings.fallback,
                "no position fix in time; using default location"
            );
            dispatch(&mut throttle, &tx, settings.fallback);
        }
    }

    // Once something has been dispatched, later errors keep the current
    // location rather than jumping back to the fallback.
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            fix = fixes.recv() => match fix {
                Some(Ok(fix)) => dispatch(&mut throttle, &tx, fix),
                Some(Err(e)) => tracing::debug!(error = %e, "position update failed; keeping last location"),
                None => {
                    tracing::debug!("position stream ended");
                    cancel.cancelled().await;
                    break;
                }
            },
        }
    }
    tracing::debug!("location watch stopped");
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
