//! Location-driven discovery of nearby support resources.
//!
//! A [`LocationWatch`] turns raw position fixes into throttled coordinate
//! dispatches. Each dispatch drives one [`DiscoveryPipeline`] cycle: keyword
//! fan-out, deduplication, detail enrichment, then type and radius
//! filtering. [`DiscoverySession`] ties the two together and publishes the
//! latest list.

pub mod dedup;
pub mod enrich;
pub mod fanout;
pub mod filter;
pub mod location;
pub mod pipeline;
pub mod session;
pub mod throttle;

#[cfg(test)]
pub(crate) mod testing;

pub use location::{
    locate_once, ChannelGeolocator, FixedGeolocator, Geolocator, LocationError, LocationSettings,
    LocationWatch, PositionFix, UnavailableGeolocator,
};
pub use pipeline::{
    discover_once, CycleState, DiscoveryPipeline, DiscoverySettings, PublishedResources,
};
pub use session::DiscoverySession;
pub use throttle::RefetchThrottle;
