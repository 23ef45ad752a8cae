//! Client for the hosted places web service: keyword-scoped nearby search,
//! place details, and photo URLs.

pub mod backend;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use backend::PlacesBackend;
pub use client::PlacesClient;
pub use error::PlacesError;
