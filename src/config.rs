//! Configuration management for the `RiskRoute` pipeline
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RiskRouteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `RiskRoute` pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskRouteConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Routing provider configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Model endpoint and sampling configuration
    #[serde(default)]
    pub models: ModelsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Routing provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// openrouteservice API key
    pub api_key: Option<String>,
    /// Base URL for the directions API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Model endpoints and sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Risk model serving endpoint (TensorFlow-Serving REST style)
    #[serde(default = "default_risk_endpoint")]
    pub risk_endpoint: String,
    /// Whether to clamp the risk score to [0, 100]. Off by default: the
    /// upstream behavior passes out-of-range model output through.
    #[serde(default)]
    pub clamp_score: bool,
    /// Base URL of the text-completion inference API
    #[serde(default = "default_completion_base_url")]
    pub completion_base_url: String,
    /// Completion model identifier
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    /// Completion API key
    pub completion_api_key: Option<String>,
    /// Upper bound on generated tokens per insight
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    /// Nucleus sampling parameter
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Request timeout in seconds for both model endpoints
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the JSON API listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_model_timeout() -> u32 {
    60
}

fn default_risk_endpoint() -> String {
    "http://localhost:8501/v1/models/delivery_risk:predict".to_string()
}

fn default_completion_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_completion_model() -> String {
    "gpt2".to_string()
}

fn default_max_new_tokens() -> u32 {
    200
}

fn default_top_p() -> f64 {
    0.9
}

fn default_temperature() -> f64 {
    0.7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    3000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_routing_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            risk_endpoint: default_risk_endpoint(),
            clamp_score: false,
            completion_base_url: default_completion_base_url(),
            completion_model: default_completion_model(),
            completion_api_key: None,
            max_new_tokens: default_max_new_tokens(),
            top_p: default_top_p(),
            temperature: default_temperature(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl RiskRouteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with RISKROUTE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("RISKROUTE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: RiskRouteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("riskroute").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    fn validate_api_keys(&self) -> Result<()> {
        for (key, name) in [
            (&self.weather.api_key, "Weather"),
            (&self.routing.api_key, "Routing"),
            (&self.models.completion_api_key, "Completion"),
        ] {
            if let Some(api_key) = key {
                if api_key.is_empty() {
                    return Err(RiskRouteError::config(format!(
                        "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        for (timeout, name) in [
            (self.weather.timeout_seconds, "Weather"),
            (self.routing.timeout_seconds, "Routing"),
            (self.models.timeout_seconds, "Model"),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(RiskRouteError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        if self.models.max_new_tokens == 0 || self.models.max_new_tokens > 4096 {
            return Err(RiskRouteError::config(
                "max_new_tokens must be between 1 and 4096",
            )
            .into());
        }

        if !(self.models.top_p > 0.0 && self.models.top_p <= 1.0) {
            return Err(RiskRouteError::config("top_p must be in (0, 1]").into());
        }

        if !(self.models.temperature > 0.0 && self.models.temperature <= 2.0) {
            return Err(RiskRouteError::config("temperature must be in (0, 2]").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RiskRouteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RiskRouteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (url, name) in [
            (&self.weather.base_url, "Weather base URL"),
            (&self.routing.base_url, "Routing base URL"),
            (&self.models.risk_endpoint, "Risk model endpoint"),
            (&self.models.completion_base_url, "Completion base URL"),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RiskRouteError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
