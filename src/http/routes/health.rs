//! Health endpoints
//!
//! Liveness answers as long as the process serves requests. Readiness
//! answers `503` once shutdown has begun.

use crate::http::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// `ok`, `ready` or `not_ready`
    pub status: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthStatus))
)]
pub async fn live() -> Json<HealthStatus> {
    Json(HealthStatus::new("ok"))
}

/// Readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Serving traffic", body = HealthStatus),
        (status = 503, description = "Shutting down", body = HealthStatus)
    )
)]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    if state.readiness.is_ready() {
        (StatusCode::OK, Json(HealthStatus::new("ready")))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus::new("not_ready")),
        )
    }
}
