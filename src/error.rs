//! Error types and handling for the `RiskRoute` pipeline

use thiserror::Error;

/// Main error type for the `RiskRoute` pipeline.
///
/// Weather degradation is deliberately absent: the weather client
/// substitutes defaults instead of failing (see `weather::WeatherClient`).
#[derive(Error, Debug)]
pub enum RiskRouteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Routing provider errors (network, provider error, empty geometry)
    #[error("Routing failed: {message}")]
    Routing { message: String },

    /// Risk model invocation errors
    #[error("Risk scoring failed: {message}")]
    Scoring { message: String },

    /// Text-completion model invocation errors
    #[error("Insight generation failed: {message}")]
    Insight { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RiskRouteError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new routing error
    pub fn routing<S: Into<String>>(message: S) -> Self {
        Self::Routing {
            message: message.into(),
        }
    }

    /// Create a new scoring error
    pub fn scoring<S: Into<String>>(message: S) -> Self {
        Self::Scoring {
            message: message.into(),
        }
    }

    /// Create a new insight error
    pub fn insight<S: Into<String>>(message: S) -> Self {
        Self::Insight {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RiskRouteError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            RiskRouteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            RiskRouteError::Routing { message } => {
                format!("Route generation error: {message}")
            }
            RiskRouteError::Scoring { message } | RiskRouteError::Insight { message } => {
                format!("Error during risk assessment: {message}")
            }
            RiskRouteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
