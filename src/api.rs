//! JSON API for the three workflows

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RiskRouteError;
use crate::orchestrator::{CustomerCheck, LogisticsRoute, Orchestrator, RetailerRoute};

#[derive(Debug, Deserialize)]
pub struct CustomerCheckRequest {
    pub city: String,
    pub product: String,
}

#[derive(Debug, Deserialize)]
pub struct RetailerRouteRequest {
    pub customer_city: String,
    pub warehouse_city: String,
}

#[derive(Debug, Deserialize)]
pub struct LogisticsRouteRequest {
    pub destination_city: String,
    pub warehouse_city: String,
    pub product: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/customer-check", post(customer_check))
        .route("/retailer-route", post(retailer_route))
        .route("/logistics-route", post(logistics_route))
        .with_state(orchestrator)
}

async fn customer_check(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(request): Json<CustomerCheckRequest>,
) -> ApiResult<CustomerCheck> {
    orchestrator
        .customer_check(&request.city, &request.product)
        .await
        .map(Json)
        .map_err(into_response)
}

async fn retailer_route(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(request): Json<RetailerRouteRequest>,
) -> ApiResult<RetailerRoute> {
    orchestrator
        .retailer_route(&request.customer_city, &request.warehouse_city)
        .await
        .map(Json)
        .map_err(into_response)
}

async fn logistics_route(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(request): Json<LogisticsRouteRequest>,
) -> ApiResult<LogisticsRoute> {
    orchestrator
        .logistics_route(
            &request.destination_city,
            &request.warehouse_city,
            &request.product,
        )
        .await
        .map(Json)
        .map_err(into_response)
}

fn into_response(error: RiskRouteError) -> (StatusCode, Json<ApiError>) {
    let status = match &error {
        RiskRouteError::Validation { .. } => StatusCode::BAD_REQUEST,
        RiskRouteError::Routing { .. }
        | RiskRouteError::Scoring { .. }
        | RiskRouteError::Insight { .. } => StatusCode::BAD_GATEWAY,
        RiskRouteError::Config { .. } | RiskRouteError::Io { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        warn!("Workflow failed: {error}");
    }

    (
        status,
        Json(ApiError {
            error: error.user_message(),
        }),
    )
}
