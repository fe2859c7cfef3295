//! Streaming Query Routes
//!
//! SSE endpoints for brain and conversation queries. Preconditions (brain
//! exists, has documents, question validates) are checked before the stream
//! opens so they surface as normal HTTP errors; anything that fails after
//! that becomes a terminal `error` event inside the stream.

use axum::{
    extract::{Path, State},
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::post,
    Router,
};
use futures_util::{Stream, StreamExt};
use std::convert::Infallible;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::query::validate_query;
use crate::state::AppState;
use crate::types::{ConversationQueryRequest, QueryRequest, StreamEvent};

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /stream/brains/{id}/query - Stream a one-shot query
#[utoipa::path(
    post,
    path = "/stream/brains/{id}/query",
    tag = "Query",
    params(("id" = String, Path, format = "uuid")),
    request_body = QueryRequest,
    responses(
        (status = 200, description = "SSE stream of content/sources/done/error events", body = String, content_type = "text/event-stream"),
        (status = 400, description = "Validation failed or brain has no documents", body = crate::error::ApiError),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn stream_brain_query(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
    axum::Json(req): axum::Json<QueryRequest>,
) -> ApiResult<impl IntoResponse> {
    let brain = state.registry.get(brain_id)?;
    let params = validate_query(
        &req.question,
        req.max_tokens_or_default(),
        req.temperature_or_default(),
    )?;
    if brain.document_count == 0 {
        return Err(ApiError::empty_brain());
    }

    let stream = state
        .streams
        .clone()
        .brain_stream(brain, req.question.trim().to_string(), params);
    Ok(sse_response(stream))
}

/// POST /stream/conversations/{id}/query - Stream a contextual query
#[utoipa::path(
    post,
    path = "/stream/conversations/{id}/query",
    tag = "Query",
    params(("id" = String, Path, format = "uuid")),
    request_body = ConversationQueryRequest,
    responses(
        (status = 200, description = "SSE stream of content/sources/done/error events", body = String, content_type = "text/event-stream"),
        (status = 400, description = "Validation failed or brain has no documents", body = crate::error::ApiError),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn stream_conversation_query(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    axum::Json(req): axum::Json<ConversationQueryRequest>,
) -> ApiResult<impl IntoResponse> {
    let params = validate_query(
        &req.question,
        req.max_tokens_or_default(),
        req.temperature_or_default(),
    )?;
    let question = req.question.trim().to_string();

    // Appends the user message; the stream appends the assistant one on done
    let ctx = state.conversations.begin_query(
        conversation_id,
        &question,
        req.context_window_or_default(),
    )?;

    let stream = state
        .streams
        .clone()
        .conversation_stream(conversation_id, ctx, question, params);
    Ok(sse_response(stream))
}

// ============================================================================
// SSE PLUMBING
// ============================================================================

/// Wrap an event stream in an SSE response with the standard headers.
fn sse_response(stream: impl Stream<Item = StreamEvent> + Send + 'static) -> impl IntoResponse {
    let sse = Sse::new(stream.map(to_sse_event)).keep_alive(KeepAlive::default());
    ([(header::CACHE_CONTROL, "no-cache")], sse)
}

fn to_sse_event(event: StreamEvent) -> Result<Event, Infallible> {
    let data = serde_json::to_string(&event).unwrap_or_else(|_| {
        r#"{"type":"error","error":"event serialization failed"}"#.to_string()
    });
    Ok(Event::default().data(data))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the streaming query router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/stream/brains/:id/query", post(stream_brain_query))
        .route(
            "/stream/conversations/:id/query",
            post(stream_conversation_query),
        )
}
