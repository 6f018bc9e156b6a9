//! OpenRouteService driving distance

use crate::config::{HttpConfig, RoutingConfig};
use crate::http::{build_client, endpoint};
use crate::models::Coordinate;
use crate::{GeoError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "OpenRouteService";
const DIRECTIONS_PATH: &str = "v2/directions/driving-car";

/// Client for the OpenRouteService car directions endpoint
pub struct RouteDistanceCalculator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    /// Metres
    distance: f64,
}

impl RouteDistanceCalculator {
    /// Create a new calculator. A missing API key is not rejected here; the
    /// provider refuses the request instead.
    pub fn new(config: &RoutingConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(
            build_client(http)?,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a calculator around an existing HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        if api_key.is_none() {
            warn!("No OpenRouteService API key configured; requests will be rejected");
        }
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Driving distance from `start` to `end` in kilometres.
    ///
    /// Returns `Ok(None)` when the provider answers with a non-success status.
    #[instrument(skip_all, fields(start = %start, end = %end))]
    pub async fn distance_km(&self, start: Coordinate, end: Coordinate) -> Result<Option<f64>> {
        let mut url = format!("{}?", endpoint(&self.base_url, DIRECTIONS_PATH));
        if let Some(api_key) = &self.api_key {
            url.push_str(&format!("api_key={}&", urlencoding::encode(api_key)));
        }
        url.push_str(&format!(
            "start={}&end={}",
            urlencoding::encode(&start.to_string()),
            urlencoding::encode(&end.to_string())
        ));

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!("OpenRouteService responded with {}", status);

        if !status.is_success() {
            warn!(
                "Directions request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let distance_km = distance_from_body(&body)?;
        info!("Driving distance {:.3} km", distance_km);

        Ok(Some(distance_km))
    }
}

fn distance_from_body(body: &str) -> Result<f64> {
    let directions: DirectionsResponse =
        serde_json::from_str(body).map_err(|e| GeoError::parse(PROVIDER, e.to_string()))?;

    directions
        .features
        .first()
        .ok_or_else(|| GeoError::unexpected(PROVIDER, "No features in directions response"))?
        .properties
        .segments
        .first()
        .map(|segment| segment.distance / 1000.0)
        .ok_or_else(|| GeoError::unexpected(PROVIDER, "No segments in first feature"))
}
