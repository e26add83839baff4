//! Liveness and store reachability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub server_time: String,
}

/// `GET /health`: 200 when the store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.catalog.health_check().await;
    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            database,
            server_time: Utc::now().to_rfc3339(),
        }),
    )
}
