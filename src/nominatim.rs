//! Nominatim place search

use crate::config::{HttpConfig, PlaceConfig};
use crate::http::{build_client, endpoint};
use crate::models::PlaceLookup;
use crate::{GeoError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "Nominatim";

/// Client for the Nominatim `/search` endpoint
pub struct PlaceGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl PlaceGeocoder {
    /// Create a new place geocoder
    pub fn new(config: &PlaceConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(http)?, config.base_url.clone()))
    }

    /// Create a geocoder around an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Look up `place` and return `(lat, lon)` of the first match.
    ///
    /// A failed request and an empty result both give `(None, None)`.
    #[instrument(skip(self))]
    pub async fn geocode(&self, place: &str) -> Result<PlaceLookup> {
        let url = format!(
            "{}?q={}&format=json",
            endpoint(&self.base_url, "search"),
            urlencoding::encode(place)
        );
        debug!("Nominatim request URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Nominatim request failed with status: {}", status);
            return Ok((None, None));
        }

        let body = response.text().await?;
        let lookup = lookup_from_body(&body)?;

        match &lookup {
            (Some(lat), Some(lon)) => info!("Geocoded '{}' to ({}, {})", place, lat, lon),
            _ => warn!("No Nominatim results for '{}'", place),
        }

        Ok(lookup)
    }
}

fn lookup_from_body(body: &str) -> Result<PlaceLookup> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|e| GeoError::parse(PROVIDER, e.to_string()))?;

    Ok(places
        .into_iter()
        .next()
        .map_or((None, None), |first| (Some(first.lat), Some(first.lon))))
}
