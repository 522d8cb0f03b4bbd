//! Delivery risk scoring.
//!
//! Builds the fixed-shape feature window the trained model expects and
//! turns its continuous output into a bounded integer score.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ModelsConfig;
use crate::error::RiskRouteError;
use crate::models::WeatherObservation;
use crate::predictor::Predictor;
use crate::Result;

/// Number of observations in the model's temporal input window
pub const WINDOW_LEN: usize = 7;

/// Fixed `(7, 3)` feature window fed to the risk model as a single batch.
///
/// Only one live observation exists per request, so it is repeated seven
/// times to fill the window. The repetition is required by the trained
/// model's input shape `(1, 7, 3)` and must not be collapsed; feeding
/// real historical observations instead is a possible future improvement,
/// not a bug fix.
pub type FeatureWindow = [[f32; 3]; WINDOW_LEN];

/// Integer delivery risk score. Expected range is [0, 100]; the range is
/// only enforced when clamping is enabled in configuration.
pub type RiskScore = i32;

/// Scores delivery risk for a weather observation via a pluggable model
pub struct RiskScorer {
    model: Arc<dyn Predictor<FeatureWindow, f32>>,
    clamp: bool,
}

impl RiskScorer {
    /// Create a scorer around an opaque risk model
    pub fn new(model: Arc<dyn Predictor<FeatureWindow, f32>>, clamp: bool) -> Self {
        Self { model, clamp }
    }

    /// Build the model input window from one observation
    #[must_use]
    pub fn feature_window(observation: &WeatherObservation) -> FeatureWindow {
        let features = [
            observation.temperature as f32,
            observation.wind_speed as f32,
            observation.rain_volume_1h as f32,
        ];
        [features; WINDOW_LEN]
    }

    /// Score one observation.
    ///
    /// The model's first scalar output (roughly [0, 1]) is scaled by 100
    /// and truncated to an integer. A model invocation error surfaces as
    /// a scoring failure and aborts the workflow.
    pub async fn score(&self, observation: &WeatherObservation) -> Result<RiskScore> {
        let window = Self::feature_window(observation);

        let raw = self
            .model
            .predict(window)
            .await
            .map_err(|e| RiskRouteError::scoring(format!("{e:#}")))?;

        // Scale in f32, the model's own precision: 0.42 must become 42.
        let score = (raw * 100.0) as RiskScore;
        let score = if self.clamp { score.clamp(0, 100) } else { score };

        debug!("Risk model output {raw} -> score {score}");
        Ok(score)
    }
}

/// Risk model served over a TensorFlow-Serving style REST endpoint.
///
/// Posts `{"instances": [window]}` and reads `{"predictions": [[score]]}`.
pub struct ServedRiskModel {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

impl ServedRiskModel {
    /// Create a client for the configured serving endpoint
    #[must_use]
    pub fn new(config: &ModelsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("riskroute/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.risk_endpoint.clone(),
        }
    }
}

#[async_trait]
impl Predictor<FeatureWindow, f32> for ServedRiskModel {
    async fn predict(&self, input: FeatureWindow) -> anyhow::Result<f32> {
        let body = json!({ "instances": [input] });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .with_context(|| "Risk model request failed")?
            .error_for_status()
            .with_context(|| "Risk model returned an error status")?;

        let payload: PredictResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse risk model response")?;

        payload
            .predictions
            .first()
            .and_then(|row| row.first())
            .copied()
            .ok_or_else(|| anyhow!("Risk model returned no predictions"))
    }
}
