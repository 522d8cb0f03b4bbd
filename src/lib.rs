//! `RiskRoute` - Delivery risk scoring and route planning for shipments
//!
//! This library composes a weather provider, a predictive risk model and
//! a routing provider into three workflows: customer risk check, retailer
//! route and logistics route. Provider models are pluggable so the
//! pipeline runs against deterministic stubs in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod insight;
pub mod models;
pub mod orchestrator;
pub mod predictor;
pub mod routing;
pub mod scoring;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::RiskRouteConfig;
pub use error::RiskRouteError;
pub use insight::{CompletionRequest, HuggingFaceTextModel, InsightGenerator};
pub use models::{GeoPoint, ManeuverType, RouteStep, RouteSummary, WeatherObservation};
pub use orchestrator::{
    CustomerCheck, LogisticsRoute, Orchestrator, RetailerRoute, RouteSource, WeatherSource,
};
pub use predictor::Predictor;
pub use routing::RouteClient;
pub use scoring::{FeatureWindow, RiskScore, RiskScorer, ServedRiskModel, WINDOW_LEN};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RiskRouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
