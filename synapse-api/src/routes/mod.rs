//! REST API Routes Module
//!
//! All route handlers organized by entity:
//! - Brain CRUD and synchronous query
//! - Document upload/list/get/delete
//! - Streaming query endpoints (SSE)
//! - Conversation lifecycle, transcripts, contextual query
//! - Brain template catalog and template-seeded brain creation
//! - Health and service metadata
//! - CORS support for browser-based clients

pub mod brains;
pub mod conversations;
pub mod documents;
pub mod health;
pub mod streaming;
pub mod templates;

use axum::{http::HeaderValue, response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::types::ServiceInfo;

// Re-export route creation functions for convenience
pub use brains::create_router as brain_router;
pub use conversations::create_router as conversation_router;
pub use documents::create_router as document_router;
pub use health::create_router as health_router;
pub use streaming::create_router as streaming_router;
pub use templates::create_router as template_router;

// ============================================================================
// SERVICE METADATA ENDPOINTS
// ============================================================================

/// Handler for the / service banner.
async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        service: "synapse".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for /openapi.json.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// APP ASSEMBLY
// ============================================================================

/// Build the complete application router over the given state.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/", get(service_info))
        .route("/openapi.json", get(openapi_json))
        .merge(brain_router())
        .merge(document_router())
        .merge(conversation_router())
        .merge(streaming_router())
        .merge(template_router())
        .merge(health_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    if state.config.cors_allow_any() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
