//! Coordinate value type used by the routing client

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point given as longitude then latitude, in decimal degrees.
///
/// Ranges are not checked; the providers reject malformed values.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }
}

/// Renders as `lon,lat`, the form OpenRouteService expects for `start`/`end`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}
