//! Distance-based refetch throttling for location updates.

use sweekar_core::geo::{haversine_m, DISTANCE_TOLERANCE_M};
use sweekar_core::Coordinate;

/// Decides whether a new location fix is far enough from the last
/// dispatched one to start a new discovery cycle.
///
/// Distance is always measured against the last *dispatched* fix, so a slow
/// drift of many small steps still triggers once the total reaches the limit.
#[derive(Debug, Clone)]
pub struct RefetchThrottle {
    min_distance_m: f64,
    last_dispatched: Option<Coordinate>,
}

impl RefetchThrottle {
    #[must_use]
    pub fn new(min_distance_m: f64) -> Self {
        Self {
            min_distance_m,
            last_dispatched: None,
        }
    }

    /// Returns `true` and records `fix` when it should be dispatched.
    pub fn observe(&mut self, fix: Coordinate) -> bool {
        let dispatch = match self.last_dispatched {
            None => true,
            Some(last) => haversine_m(last, fix) + DISTANCE_TOLERANCE_M >= self.min_distance_m,
        };
        if dispatch {
            self.last_dispatched = Some(fix);
        }
        dispatch
    }

    #[must_use]
    pub fn last_dispatched(&self) -> Option<Coordinate> {
        self.last_dispatched
    }
}
