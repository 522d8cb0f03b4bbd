//! HTTP-level tests for the workflow endpoints, driven against stub
//! providers so no network or model weights are involved.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use riskroute::config::ModelsConfig;
use riskroute::insight::{CompletionRequest, InsightGenerator};
use riskroute::models::{GeoPoint, RouteStep, RouteSummary, WeatherObservation};
use riskroute::orchestrator::{Orchestrator, RouteSource, WeatherSource};
use riskroute::scoring::{FeatureWindow, RiskScorer};
use riskroute::{api, Predictor, Result, RiskRouteError};

struct StubWeather;

#[async_trait]
impl WeatherSource for StubWeather {
    async fn fetch(&self, _place: &str) -> WeatherObservation {
        WeatherObservation {
            temperature: 25.0,
            wind_speed: 5.0,
            rain_volume_1h: 0.0,
            location: GeoPoint::new(48.8534, 2.3488),
        }
    }
}

struct StubRoutes {
    fail: bool,
}

#[async_trait]
impl RouteSource for StubRoutes {
    async fn route(&self, _origin: GeoPoint, _destination: GeoPoint) -> Result<RouteSummary> {
        if self.fail {
            return Err(RiskRouteError::routing("No route features in provider response"));
        }
        Ok(RouteSummary {
            distance_km: 12.35,
            duration_minutes: 11.3,
            steps: vec![RouteStep {
                instruction: "Head north".to_string(),
                distance_meters: 200.0,
                duration_seconds: 30.0,
                maneuver_type: None,
            }],
            polyline: vec![GeoPoint::new(48.8534, 2.3488)],
        })
    }
}

struct StubRiskModel;

#[async_trait]
impl Predictor<FeatureWindow, f32> for StubRiskModel {
    async fn predict(&self, _input: FeatureWindow) -> anyhow::Result<f32> {
        Ok(0.42)
    }
}

struct StubInsightModel;

#[async_trait]
impl Predictor<CompletionRequest, String> for StubInsightModel {
    async fn predict(&self, _input: CompletionRequest) -> anyhow::Result<String> {
        Ok("Proceed".to_string())
    }
}

fn router(routing_fails: bool) -> axum::Router {
    let orchestrator = Orchestrator::new(
        Arc::new(StubWeather),
        Arc::new(StubRoutes {
            fail: routing_fails,
        }),
        RiskScorer::new(Arc::new(StubRiskModel), false),
        InsightGenerator::new(Arc::new(StubInsightModel), &ModelsConfig::default()),
    );
    api::router(Arc::new(orchestrator))
}

async fn post(router: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn customer_check_returns_score_and_insight() {
    let (status, body) = post(
        router(false),
        "/customer-check",
        json!({"city": "Paris", "product": "Laptop"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 42);
    assert_eq!(body["insight"], "Proceed");
    assert_eq!(body["weather"]["temperature"], 25.0);
    assert_eq!(body["weather"]["wind_speed"], 5.0);
    assert_eq!(body["weather"]["rain_volume_1h"], 0.0);
}

#[tokio::test]
async fn customer_check_rejects_empty_city() {
    let (status, body) = post(
        router(false),
        "/customer-check",
        json!({"city": "", "product": "Laptop"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("city"));
}

#[tokio::test]
async fn retailer_route_returns_summary_with_labels() {
    let (status, body) = post(
        router(false),
        "/retailer-route",
        json!({"customer_city": "Paris", "warehouse_city": "Lyon"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], "Lyon");
    assert_eq!(body["to"], "Paris");
    assert_eq!(body["route"]["distance_km"], 12.35);
    assert_eq!(body["route"]["duration_minutes"], 11.3);
    assert_eq!(body["route"]["steps"][0]["instruction"], "Head north");
}

#[tokio::test]
async fn retailer_route_surfaces_routing_failure() {
    let (status, body) = post(
        router(true),
        "/retailer-route",
        json!({"customer_city": "Paris", "warehouse_city": "Lyon"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("No route features")
    );
}

#[tokio::test]
async fn logistics_route_carries_product() {
    let (status, body) = post(
        router(false),
        "/logistics-route",
        json!({
            "destination_city": "Marseille",
            "warehouse_city": "Lyon",
            "product": "Laptop"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], "Lyon");
    assert_eq!(body["to"], "Marseille");
    assert_eq!(body["product"], "Laptop");
    assert_eq!(body["route"]["distance_km"], 12.35);
}
