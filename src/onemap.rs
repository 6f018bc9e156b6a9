//! OneMap address search
//!
//! Resolves a Singapore address or postal code to the latitude and longitude
//! of the first search result.

use crate::config::{AddressConfig, HttpConfig};
use crate::http::{build_client, endpoint};
use crate::models::AddressLookup;
use crate::{GeoError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "OneMap";
const SEARCH_PATH: &str = "api/common/elastic/search";

/// Client for the OneMap elastic search endpoint
pub struct AddressGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "LATITUDE")]
    latitude: Box<RawValue>,
    #[serde(rename = "LONGITUDE")]
    longitude: Box<RawValue>,
}

/// OneMap sends coordinates as strings. Anything else keeps its JSON text
/// exactly as written, so `1.30` stays `"1.30"`.
fn field_text(raw: &RawValue) -> Result<String> {
    let text = raw.get();
    if text.starts_with('"') {
        serde_json::from_str(text).map_err(|e| GeoError::parse(PROVIDER, e.to_string()))
    } else {
        Ok(text.to_string())
    }
}

impl AddressGeocoder {
    /// Create a new address geocoder
    pub fn new(config: &AddressConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(http)?, config.base_url.clone()))
    }

    /// Create a geocoder around an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Look up `address` and return the first match's coordinates.
    ///
    /// The HTTP status is not inspected: a body without a `results` list
    /// comes back as [`GeoError::Parse`].
    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<AddressLookup> {
        let url = format!(
            "{}?searchVal={}&returnGeom=Y&getAddrDetails=Y&pageNum=1",
            endpoint(&self.base_url, SEARCH_PATH),
            urlencoding::encode(address)
        );
        debug!("OneMap request URL: {}", url);

        let response = self.client.get(&url).send().await?;
        debug!("OneMap responded with {}", response.status());

        let body = response.text().await?;
        let lookup = lookup_from_body(&body)?;

        match &lookup {
            AddressLookup::Found {
                latitude,
                longitude,
            } => info!("Geocoded '{}' to ({}, {})", address, latitude, longitude),
            AddressLookup::NotAvailable => warn!("No OneMap results for '{}'", address),
        }

        Ok(lookup)
    }
}

fn lookup_from_body(body: &str) -> Result<AddressLookup> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| GeoError::parse(PROVIDER, e.to_string()))?;

    Ok(match response.results.into_iter().next() {
        Some(first) => AddressLookup::Found {
            latitude: field_text(&first.latitude)?,
            longitude: field_text(&first.longitude)?,
        },
        None => AddressLookup::NotAvailable,
    })
}
