//! Brain Routes
//!
//! CRUD for brains plus the synchronous query endpoint. Brain deletion
//! cascades: conversations first, then documents and indexed state, then
//! the registry entry, so no child ever references a dead brain id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::services::query::validate_query;
use crate::state::AppState;
use crate::types::{
    BrainListResponse, BrainResponse, CreateBrainRequest, QueryRequest, QueryResponse,
};

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /brains - Create a brain
#[utoipa::path(
    post,
    path = "/brains",
    tag = "Brains",
    request_body = CreateBrainRequest,
    responses(
        (status = 201, description = "Brain created", body = BrainResponse),
        (status = 400, description = "Validation failed", body = crate::error::ApiError),
    ),
)]
pub async fn create_brain(
    State(state): State<AppState>,
    Json(req): Json<CreateBrainRequest>,
) -> ApiResult<(StatusCode, Json<BrainResponse>)> {
    let brain = state.registry.create(&req)?;
    Ok((StatusCode::CREATED, Json(BrainResponse::from(&brain))))
}

/// GET /brains - List all brains in creation order
#[utoipa::path(
    get,
    path = "/brains",
    tag = "Brains",
    responses(
        (status = 200, description = "All brains", body = BrainListResponse),
    ),
)]
pub async fn list_brains(State(state): State<AppState>) -> ApiResult<Json<BrainListResponse>> {
    let brains = state.registry.list()?;
    Ok(Json(BrainListResponse {
        total: brains.len(),
        brains: brains.iter().map(BrainResponse::from).collect(),
    }))
}

/// GET /brains/{id} - Fetch one brain
#[utoipa::path(
    get,
    path = "/brains/{id}",
    tag = "Brains",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "The brain", body = BrainResponse),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn get_brain(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
) -> ApiResult<Json<BrainResponse>> {
    let brain = state.registry.get(brain_id)?;
    Ok(Json(BrainResponse::from(&brain)))
}

/// DELETE /brains/{id} - Delete a brain and everything it owns
#[utoipa::path(
    delete,
    path = "/brains/{id}",
    tag = "Brains",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Brain and children deleted"),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn delete_brain(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.registry.get(brain_id)?;

    let _guard = state.locks.acquire(brain_id).await;
    state.registry.get(brain_id)?;

    // Children first: a partial failure must not leave a conversation or
    // document referencing a brain that is already gone.
    state.conversations.delete_for_brain(brain_id)?;
    state.documents.delete_all(brain_id).await?;
    state.registry.remove(brain_id)?;
    state.locks.discard(brain_id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /brains/{id}/query - Synchronous retrieval query
#[utoipa::path(
    post,
    path = "/brains/{id}/query",
    tag = "Query",
    params(("id" = String, Path, format = "uuid")),
    request_body = QueryRequest,
    responses(
        (status = 200, description = "The answer", body = QueryResponse),
        (status = 400, description = "Validation failed or brain has no documents", body = crate::error::ApiError),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
        (status = 503, description = "Engine unavailable", body = crate::error::ApiError),
    ),
)]
pub async fn query_brain(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<QueryResponse>> {
    let brain = state.registry.get(brain_id)?;
    let params = validate_query(
        &req.question,
        req.max_tokens_or_default(),
        req.temperature_or_default(),
    )?;

    let (answer, processing_time_ms) = state
        .executor
        .execute(&brain, req.question.trim(), &[], params)
        .await?;

    Ok(Json(QueryResponse {
        answer: answer.text,
        sources: answer.sources,
        tokens_used: answer.tokens_used,
        processing_time_ms,
    }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the brain router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/brains", post(create_brain).get(list_brains))
        .route("/brains/:id", get(get_brain).delete(delete_brain))
        .route("/brains/:id/query", post(query_brain))
}
