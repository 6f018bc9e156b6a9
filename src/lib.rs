//! `geolocate` - geocoding and driving-distance clients
//!
//! Three independent clients, each making one HTTP request per call:
//! OneMap address search, Nominatim place search and OpenRouteService
//! driving distance.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod nominatim;
pub mod onemap;
pub mod openrouteservice;

// Re-export core types for public API
pub use crate::config::GeoConfig;
pub use error::GeoError;
pub use models::{AddressLookup, Coordinate, NOT_AVAILABLE, PlaceLookup, place_coordinate};
pub use nominatim::PlaceGeocoder;
pub use onemap::AddressGeocoder;
pub use openrouteservice::RouteDistanceCalculator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GeoError>;
