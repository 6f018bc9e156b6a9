//! Geocoding results as the providers hand them back

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// Marker OneMap lookups report for both fields when nothing matched.
pub const NOT_AVAILABLE: &str = "NA";

/// Outcome of an address search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AddressLookup {
    /// First match, with the provider's latitude and longitude text untouched
    Found { latitude: String, longitude: String },
    /// The search returned no results
    NotAvailable,
}

impl AddressLookup {
    /// `(latitude, longitude)`, or `("NA", "NA")` when nothing matched
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        match self {
            AddressLookup::Found {
                latitude,
                longitude,
            } => (latitude.as_str(), longitude.as_str()),
            AddressLookup::NotAvailable => (NOT_AVAILABLE, NOT_AVAILABLE),
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, AddressLookup::Found { .. })
    }

    /// Parse the match into a [`Coordinate`] for routing
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            AddressLookup::Found {
                latitude,
                longitude,
            } => parse_pair(latitude, longitude),
            AddressLookup::NotAvailable => None,
        }
    }
}

/// `(lat, lon)` of the first place match; `(None, None)` when the search
/// failed or returned nothing.
pub type PlaceLookup = (Option<String>, Option<String>);

/// Parse a place lookup into a [`Coordinate`] for routing
#[must_use]
pub fn place_coordinate(lookup: &PlaceLookup) -> Option<Coordinate> {
    match lookup {
        (Some(lat), Some(lon)) => parse_pair(lat, lon),
        _ => None,
    }
}

fn parse_pair(lat: &str, lon: &str) -> Option<Coordinate> {
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    Some(Coordinate::new(lon, lat))
}
