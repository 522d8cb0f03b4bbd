//! The three risk-and-route workflows.
//!
//! Each workflow is a linear pipeline invoked once per user action:
//! fresh observations, no retries, no cross-request state. A failure in
//! scoring, insight generation or routing aborts that invocation only;
//! weather lookups cannot fail by construction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::RiskRouteError;
use crate::insight::InsightGenerator;
use crate::models::{GeoPoint, RouteSummary, WeatherObservation};
use crate::routing::RouteClient;
use crate::scoring::{RiskScore, RiskScorer};
use crate::weather::WeatherClient;
use crate::Result;

/// Source of current conditions for a place name. Infallible by
/// contract: implementations substitute defaults instead of failing.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, place: &str) -> WeatherObservation;
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch(&self, place: &str) -> WeatherObservation {
        WeatherClient::fetch(self, place).await
    }
}

/// Source of driving routes between two points
#[async_trait]
pub trait RouteSource: Send + Sync {
    async fn route(&self, origin: GeoPoint, destination: GeoPoint) -> Result<RouteSummary>;
}

#[async_trait]
impl RouteSource for RouteClient {
    async fn route(&self, origin: GeoPoint, destination: GeoPoint) -> Result<RouteSummary> {
        RouteClient::route(self, origin, destination).await
    }
}

/// Result of a customer risk check
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerCheck {
    pub weather: WeatherObservation,
    pub risk_score: RiskScore,
    pub insight: String,
}

/// Result of a retailer route lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RetailerRoute {
    /// Warehouse city, the route origin
    pub from: String,
    /// Customer city, the route destination
    pub to: String,
    pub warehouse_weather: WeatherObservation,
    pub customer_weather: WeatherObservation,
    pub route: RouteSummary,
}

/// Result of a logistics route lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogisticsRoute {
    /// Warehouse city, the route origin
    pub from: String,
    /// Destination city
    pub to: String,
    pub product: String,
    pub warehouse_weather: WeatherObservation,
    pub destination_weather: WeatherObservation,
    pub route: RouteSummary,
}

/// Composes the provider clients into the three workflows.
///
/// Constructed once at process start; the clients it holds are stateless
/// after configuration and safe for concurrent reuse.
pub struct Orchestrator {
    weather: Arc<dyn WeatherSource>,
    routes: Arc<dyn RouteSource>,
    scorer: RiskScorer,
    insights: InsightGenerator,
}

impl Orchestrator {
    /// Wire the workflows to their providers
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        routes: Arc<dyn RouteSource>,
        scorer: RiskScorer,
        insights: InsightGenerator,
    ) -> Self {
        Self {
            weather,
            routes,
            scorer,
            insights,
        }
    }

    /// Customer risk check: weather, risk score, advisory insight.
    #[instrument(skip(self))]
    pub async fn customer_check(&self, city: &str, product: &str) -> Result<CustomerCheck> {
        require_non_empty(city, "city")?;
        require_non_empty(product, "product")?;

        let weather = self.weather.fetch(city).await;
        let risk_score = self.scorer.score(&weather).await?;
        let insight = self.insights.generate(city, product, risk_score).await?;

        info!("Customer check for {city}: risk score {risk_score}");
        Ok(CustomerCheck {
            weather,
            risk_score,
            insight,
        })
    }

    /// Retailer route: warehouse to customer, with both observations.
    #[instrument(skip(self))]
    pub async fn retailer_route(
        &self,
        customer_city: &str,
        warehouse_city: &str,
    ) -> Result<RetailerRoute> {
        require_non_empty(customer_city, "customer city")?;
        require_non_empty(warehouse_city, "warehouse city")?;

        // The two lookups are independent; routing waits on both.
        let (warehouse_weather, customer_weather) = tokio::join!(
            self.weather.fetch(warehouse_city),
            self.weather.fetch(customer_city)
        );

        let route = self
            .routes
            .route(warehouse_weather.location, customer_weather.location)
            .await?;

        info!(
            "Retailer route {warehouse_city} -> {customer_city}: {} km",
            route.distance_km
        );
        Ok(RetailerRoute {
            from: warehouse_city.to_string(),
            to: customer_city.to_string(),
            warehouse_weather,
            customer_weather,
            route,
        })
    }

    /// Logistics route: warehouse to destination, carrying the product.
    #[instrument(skip(self))]
    pub async fn logistics_route(
        &self,
        destination_city: &str,
        warehouse_city: &str,
        product: &str,
    ) -> Result<LogisticsRoute> {
        require_non_empty(destination_city, "destination city")?;
        require_non_empty(warehouse_city, "warehouse city")?;
        require_non_empty(product, "product")?;

        let (warehouse_weather, destination_weather) = tokio::join!(
            self.weather.fetch(warehouse_city),
            self.weather.fetch(destination_city)
        );

        let route = self
            .routes
            .route(warehouse_weather.location, destination_weather.location)
            .await?;

        info!(
            "Logistics route {warehouse_city} -> {destination_city} for {product}: {} km",
            route.distance_km
        );
        Ok(LogisticsRoute {
            from: warehouse_city.to_string(),
            to: destination_city.to_string(),
            product: product.to_string(),
            warehouse_weather,
            destination_weather,
            route,
        })
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RiskRouteError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
