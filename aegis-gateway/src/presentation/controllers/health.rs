//! Health check controller

use axum::response::Json;
use chrono::Utc;

use crate::presentation::models::HealthResponse;

/// GET /health - liveness check, never rate limited
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
