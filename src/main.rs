use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use riskroute::config::RiskRouteConfig;
use riskroute::insight::{HuggingFaceTextModel, InsightGenerator};
use riskroute::orchestrator::Orchestrator;
use riskroute::routing::RouteClient;
use riskroute::scoring::{RiskScorer, ServedRiskModel};
use riskroute::weather::WeatherClient;
use riskroute::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RiskRouteConfig::load().with_context(|| "Failed to load configuration")?;

    init_tracing(&config);

    // Provider clients live for the whole process and are shared across
    // workflow invocations.
    let weather = Arc::new(WeatherClient::new(&config.weather));
    let routes = Arc::new(RouteClient::new(&config.routing));
    let scorer = RiskScorer::new(
        Arc::new(ServedRiskModel::new(&config.models)),
        config.models.clamp_score,
    );
    let insights = InsightGenerator::new(
        Arc::new(HuggingFaceTextModel::new(&config.models)),
        &config.models,
    );

    let orchestrator = Arc::new(Orchestrator::new(weather, routes, scorer, insights));

    web::run(config.server.port, orchestrator).await
}

fn init_tracing(config: &RiskRouteConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
