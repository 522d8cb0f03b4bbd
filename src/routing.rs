//! Fail-hard openrouteservice client.
//!
//! Unlike the weather client there is no safe substitute for a missing
//! route, so every provider problem surfaces as a routing error and
//! aborts the workflow.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::config::RoutingConfig;
use crate::error::RiskRouteError;
use crate::models::{GeoPoint, ManeuverType, RouteStep, RouteSummary};
use crate::Result;

/// Client for the openrouteservice directions API
pub struct RouteClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl RouteClient {
    /// Create a new client from configuration
    #[must_use]
    pub fn new(config: &RoutingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("riskroute/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Request a driving route with turn-by-turn instructions and reduce
    /// it to a normalized summary.
    pub async fn route(&self, origin: GeoPoint, destination: GeoPoint) -> Result<RouteSummary> {
        debug!(
            "Requesting driving route {} -> {}",
            origin.format_coordinates(),
            destination.format_coordinates()
        );

        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);

        // GeoJSON wants (lon, lat) order on the wire.
        let body = json!({
            "coordinates": [
                [origin.longitude, origin.latitude],
                [destination.longitude, destination.latitude],
            ],
            "instructions": true,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RiskRouteError::routing(format!("Directions request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RiskRouteError::routing(format!(
                "Routing provider error {status}: {error_text}"
            )));
        }

        let payload: ors::RouteResponse = response.json().await.map_err(|e| {
            RiskRouteError::routing(format!("Failed to parse directions response: {e}"))
        })?;

        let summary = summarize(payload)?;
        info!(
            "Route computed: {} km, {} minutes, {} steps",
            summary.distance_km,
            summary.duration_minutes,
            summary.steps.len()
        );
        Ok(summary)
    }
}

/// Reduce a provider feature collection to a `RouteSummary`.
///
/// Only the first feature and its first segment are consulted; a response
/// without either has no usable route and is an error, not a default.
fn summarize(response: ors::RouteResponse) -> Result<RouteSummary> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RiskRouteError::routing("No route features in provider response"))?;

    let segment = feature
        .properties
        .segments
        .into_iter()
        .next()
        .ok_or_else(|| RiskRouteError::routing("No route segments in provider response"))?;

    let steps = segment
        .steps
        .into_iter()
        .map(|step| RouteStep {
            instruction: step.instruction,
            distance_meters: step.distance,
            duration_seconds: step.duration,
            maneuver_type: step.maneuver.map(ManeuverType::from_code),
        })
        .collect();

    let polyline = feature
        .geometry
        .coordinates
        .into_iter()
        .map(GeoPoint::from_lon_lat)
        .collect();

    Ok(RouteSummary {
        distance_km: round2(feature.properties.summary.distance / 1000.0),
        duration_minutes: round2(feature.properties.summary.duration / 60.0),
        steps,
        polyline,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `openrouteservice` GeoJSON response structures
mod ors {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct RouteResponse {
        #[serde(default)]
        pub features: Vec<Feature>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub properties: Properties,
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub struct Properties {
        pub summary: Summary,
        #[serde(default)]
        pub segments: Vec<Segment>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Summary {
        pub distance: f64,
        pub duration: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Segment {
        #[serde(default)]
        pub steps: Vec<Step>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Step {
        pub instruction: String,
        pub distance: f64,
        pub duration: f64,
        #[serde(rename = "type")]
        pub maneuver: Option<u8>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        #[serde(default)]
        pub coordinates: Vec<[f64; 2]>,
    }
}
