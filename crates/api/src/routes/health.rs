//! Status and health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

async fn api_status() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Smart Budget API running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates status and health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_status))
        .route("/health", get(health_check))
}
