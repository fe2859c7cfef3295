//! Health Check Endpoint
//!
//! Aggregate health for the gateway and its retrieval-generation engine.
//! No authentication, no side effects.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /health - Aggregate gateway + engine health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All components healthy", body = HealthResponse),
        (status = 503, description = "Engine unavailable", body = HealthResponse),
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let engine = match state.engine.health().await {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    };
    let healthy = engine == "ok";

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        engine,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response))
}

/// Create the health router.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
