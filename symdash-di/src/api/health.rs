//! Health check endpoint
//!
//! [REQ-DI-NF-040]: Health endpoint for monitoring

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response [REQ-DI-NF-040]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "symdash-di".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
