//! Domain types and shared configuration for Sweekar resource discovery.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod error;
pub mod geo;
pub mod listing;
pub mod resource;

pub use app_config::{AppConfig, Environment};
pub use categories::{CategoryProfile, CategoryTable};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::{haversine_m, within_m, Coordinate, DEFAULT_CENTER};
pub use resource::{OpenStatus, PlaceDetail, RawPlace};
