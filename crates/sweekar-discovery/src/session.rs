//! A long-running discovery session: re-runs the pipeline every time the
//! location watch dispatches a new coordinate.

use std::sync::Arc;

use sweekar_core::{CategoryProfile, Coordinate, PlaceDetail};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::location::LocationWatch;
use crate::pipeline::{CycleState, DiscoveryPipeline, PublishedResources};

/// Owns a [`LocationWatch`] and the task that turns its coordinates into
/// published resource lists.
///
/// When a coordinate arrives while a cycle is still running, that cycle is
/// dropped along with its outstanding requests and a new one starts for the
/// latest coordinate. Results of a dropped cycle are never published.
pub struct DiscoverySession {
    resources: watch::Receiver<Option<PublishedResources>>,
    state: watch::Receiver<CycleState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    location: LocationWatch,
}

impl DiscoverySession {
    /// Starts the session. Must be called within a Tokio runtime.
    #[must_use]
    pub fn start(
        pipeline: Arc<DiscoveryPipeline>,
        profile: CategoryProfile,
        location: LocationWatch,
    ) -> Self {
        let (resources_tx, resources) = watch::channel(None);
        let (state_tx, state) = watch::channel(CycleState::Idle);
        let cancel = CancellationToken::new();
        let report = move |next: CycleState| {
            state_tx.send_replace(next);
        };
        let task = tokio::spawn(coordinate(
            pipeline,
            profile,
            location.subscribe(),
            resources_tx,
            report,
            cancel.clone(),
        ));
        Self {
            resources,
            state,
            cancel,
            task,
            location,
        }
    }

    /// Receiver for published lists. Each publish replaces the previous one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<PublishedResources>> {
        self.resources.clone()
    }

    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<CycleState> {
        self.state.clone()
    }

    #[must_use]
    pub fn state(&self) -> CycleState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn latest(&self) -> Option<PublishedResources> {
        self.resources.borrow().clone()
    }

    /// Stops the session and its location watch.
    pub fn cancel(&self) {
        self.cancel.cancel();
        self.location.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DiscoverySession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

enum CycleOutcome {
    Finished(Vec<PlaceDetail>),
    Superseded,
}

/// Waits for the next dispatched coordinate. `None` means the session should
/// stop.
async fn next_coordinate(
    coords: &mut watch::Receiver<Option<Coordinate>>,
    cancel: &CancellationToken,
) -> Option<Coordinate> {
    loop {
        if let Some(fix) = *coords.borrow_and_update() {
            return Some(fix);
        }
        tokio::select! {
            () = cancel.cancelled() => return None,
            changed = coords.changed() => {
                if changed.is_err() {
                    return None;
                }
            }
        }
    }
}

/// Drives cycles until cancelled. Every cycle reports `LocationPending`
/// first, then the pipeline's stages, then `Published` or `Abandoned`.
async fn coordinate<R>(
    pipeline: Arc<DiscoveryPipeline>,
    profile: CategoryProfile,
    mut coords: watch::Receiver<Option<Coordinate>>,
    resources_tx: watch::Sender<Option<PublishedResources>>,
    report: R,
    cancel: CancellationToken,
) where
    R: Fn(CycleState) + Send + Sync,
{
    let mut cycle: u64 = 0;

    loop {
        report(CycleState::LocationPending);
        let Some(origin) = next_coordinate(&mut coords, &cancel).await else {
            break;
        };

        cycle += 1;
        let outcome = tokio::select! {
            () = cancel.cancelled() => break,
            resources = pipeline.run_cycle_reporting(origin, &profile, &report) => {
                CycleOutcome::Finished(resources)
            }
            Ok(()) = coords.changed() => CycleOutcome::Superseded,
        };

        match outcome {
            CycleOutcome::Finished(resources) => {
                tracing::info!(cycle, %origin, count = resources.len(), "resources published");
                resources_tx.send_replace(Some(PublishedResources {
                    cycle,
                    origin,
                    resources,
                }));
                report(CycleState::Published);

                // The published list stays current until the next dispatch.
                tokio::select! {
                    () = cancel.cancelled() => break,
                    changed = coords.changed() => {
                        if changed.is_err() {
                            // The location watch is gone; keep the last list
                            // until the session is cancelled.
                            cancel.cancelled().await;
                            break;
                        }
                    }
                }
            }
            CycleOutcome::Superseded => {
                tracing::info!(cycle, %origin, "location changed mid-cycle; abandoning");
                report(CycleState::Abandoned);
            }
        }
    }
    tracing::debug!("discovery session stopped");
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
