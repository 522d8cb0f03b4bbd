//! Natural-language delivery guidance.
//!
//! Turns (place, product, risk score) into a prompt and asks a pluggable
//! text-completion model for advisory text. Sampling makes the output
//! non-deterministic, which is acceptable: this is guidance for a human,
//! not a control signal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::ModelsConfig;
use crate::error::RiskRouteError;
use crate::predictor::Predictor;
use crate::scoring::RiskScore;
use crate::Result;

/// One bounded-length completion request with sampling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub top_p: f64,
    pub temperature: f64,
}

/// Generates advisory text for a customer risk check
pub struct InsightGenerator {
    model: Arc<dyn Predictor<CompletionRequest, String>>,
    max_new_tokens: u32,
    top_p: f64,
    temperature: f64,
}

impl InsightGenerator {
    /// Create a generator around an opaque completion model
    pub fn new(model: Arc<dyn Predictor<CompletionRequest, String>>, config: &ModelsConfig) -> Self {
        Self {
            model,
            max_new_tokens: config.max_new_tokens,
            top_p: config.top_p,
            temperature: config.temperature,
        }
    }

    /// The recommendation prompt embedding place, product and score
    #[must_use]
    pub fn prompt(place: &str, product: &str, score: RiskScore) -> String {
        format!(
            "A customer in {place} has ordered a {product}. \
             The estimated delivery risk score is {score}. \
             Based on this, provide a recommendation to the customer about \
             whether to proceed with the order, and explain why."
        )
    }

    /// Request one completion and return the generated text verbatim.
    /// A model invocation error surfaces as an insight failure.
    pub async fn generate(&self, place: &str, product: &str, score: RiskScore) -> Result<String> {
        let request = CompletionRequest {
            prompt: Self::prompt(place, product, score),
            max_new_tokens: self.max_new_tokens,
            top_p: self.top_p,
            temperature: self.temperature,
        };

        debug!("Requesting insight for '{product}' in '{place}' at score {score}");

        self.model
            .predict(request)
            .await
            .map_err(|e| RiskRouteError::insight(format!("{e:#}")))
    }
}

/// Text-completion model behind the Hugging Face inference API.
///
/// Posts `{"inputs": prompt, "parameters": {...}}` and reads the first
/// `generated_text` of the response array.
pub struct HuggingFaceTextModel {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceTextModel {
    /// Create a client for the configured completion model
    #[must_use]
    pub fn new(config: &ModelsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("riskroute/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: format!(
                "{}/{}",
                config.completion_base_url, config.completion_model
            ),
            api_key: config.completion_api_key.clone(),
        }
    }
}

#[async_trait]
impl Predictor<CompletionRequest, String> for HuggingFaceTextModel {
    async fn predict(&self, input: CompletionRequest) -> anyhow::Result<String> {
        let body = json!({
            "inputs": input.prompt,
            "parameters": {
                "max_new_tokens": input.max_new_tokens,
                "do_sample": true,
                "top_p": input.top_p,
                "temperature": input.temperature,
            },
        });

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = request
            .send()
            .await
            .with_context(|| "Completion request failed")?
            .error_for_status()
            .with_context(|| "Completion model returned an error status")?;

        let payload: Vec<serde_json::Value> = response
            .json()
            .await
            .with_context(|| "Failed to parse completion response")?;

        payload
            .first()
            .and_then(|entry| entry.get("generated_text"))
            .and_then(|text| text.as_str())
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("Completion model returned no generated text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelsConfig;

    struct EchoModel;

    #[async_trait]
    impl Predictor<CompletionRequest, String> for EchoModel {
        async fn predict(&self, input: CompletionRequest) -> anyhow::Result<String> {
            Ok(input.prompt)
        }
    }

    struct CapturingModel(std::sync::Mutex<Vec<CompletionRequest>>);

    #[async_trait]
    impl Predictor<CompletionRequest, String> for CapturingModel {
        async fn predict(&self, input: CompletionRequest) -> anyhow::Result<String> {
            self.0.lock().unwrap().push(input);
            Ok("Proceed".to_string())
        }
    }

    #[test]
    fn test_prompt_embeds_place_product_and_score() {
        let prompt = InsightGenerator::prompt("Paris", "Laptop", 42);
        assert!(prompt.contains("A customer in Paris has ordered a Laptop."));
        assert!(prompt.contains("risk score is 42"));
        assert!(prompt.contains("whether to proceed with the order"));
    }

    #[tokio::test]
    async fn test_generated_text_returned_verbatim() {
        let generator = InsightGenerator::new(Arc::new(EchoModel), &ModelsConfig::default());
        let insight = generator.generate("Paris", "Laptop", 42).await.unwrap();
        assert_eq!(insight, InsightGenerator::prompt("Paris", "Laptop", 42));
    }

    #[tokio::test]
    async fn test_sampling_parameters_come_from_config() {
        let model = Arc::new(CapturingModel(std::sync::Mutex::new(Vec::new())));
        let generator = InsightGenerator::new(model.clone(), &ModelsConfig::default());
        generator.generate("Paris", "Laptop", 42).await.unwrap();

        let requests = model.0.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_new_tokens, 200);
        assert_eq!(requests[0].top_p, 0.9);
        assert_eq!(requests[0].temperature, 0.7);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_as_insight_error() {
        struct FailingModel;

        #[async_trait]
        impl Predictor<CompletionRequest, String> for FailingModel {
            async fn predict(&self, _input: CompletionRequest) -> anyhow::Result<String> {
                Err(anyhow!("rate limited"))
            }
        }

        let generator = InsightGenerator::new(Arc::new(FailingModel), &ModelsConfig::default());
        let result = generator.generate("Paris", "Laptop", 42).await;
        assert!(matches!(result, Err(RiskRouteError::Insight { .. })));
    }
}
