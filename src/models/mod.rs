//! Data models shared by the clients
//!
//! - Coordinate: longitude/latitude pair fed to the routing client
//! - Lookup: geocoding outcomes with their "no data" forms

pub mod coordinate;
pub mod lookup;

pub use coordinate::Coordinate;
pub use lookup::{AddressLookup, NOT_AVAILABLE, PlaceLookup, place_coordinate};
