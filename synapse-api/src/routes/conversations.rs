//! Conversation Routes
//!
//! Conversation lifecycle, transcript management, and conversation-scoped
//! queries where prior turns become engine context.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::services::query::validate_query;
use crate::state::AppState;
use crate::types::{
    AddMessageRequest, ConversationGetParams, ConversationListParams, ConversationListResponse,
    ConversationQueryRequest, ConversationResponse, CreateConversationRequest, MessageResponse,
    QueryResponse, UpdateTitleRequest,
};

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /conversations - Create a conversation in a brain
#[utoipa::path(
    post,
    path = "/conversations",
    tag = "Conversations",
    request_body = CreateConversationRequest,
    responses(
        (status = 201, description = "Conversation created", body = ConversationResponse),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>,
) -> ApiResult<(StatusCode, Json<ConversationResponse>)> {
    let conversation = state.conversations.create(&req)?;
    Ok((
        StatusCode::CREATED,
        Json(ConversationResponse::from_conversation(&conversation, false)),
    ))
}

/// GET /conversations - List conversations, optionally for one brain
#[utoipa::path(
    get,
    path = "/conversations",
    tag = "Conversations",
    params(ConversationListParams),
    responses(
        (status = 200, description = "Conversations, most recently updated first", body = ConversationListResponse),
    ),
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(params): Query<ConversationListParams>,
) -> ApiResult<Json<ConversationListResponse>> {
    let conversations = state.conversations.list(params.brain_id)?;
    Ok(Json(ConversationListResponse {
        total: conversations.len(),
        conversations: conversations
            .iter()
            .map(|c| ConversationResponse::from_conversation(c, false))
            .collect(),
    }))
}

/// GET /conversations/{id} - Fetch one conversation
#[utoipa::path(
    get,
    path = "/conversations/{id}",
    tag = "Conversations",
    params(
        ("id" = String, Path, format = "uuid"),
        ConversationGetParams,
    ),
    responses(
        (status = 200, description = "The conversation", body = ConversationResponse),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Query(params): Query<ConversationGetParams>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation = state.conversations.get(conversation_id)?;
    Ok(Json(ConversationResponse::from_conversation(
        &conversation,
        params.include_messages,
    )))
}

/// DELETE /conversations/{id} - Delete a conversation
#[utoipa::path(
    delete,
    path = "/conversations/{id}",
    tag = "Conversations",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Conversation deleted"),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.conversations.delete(conversation_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /conversations/{id}/title - Rename a conversation
#[utoipa::path(
    patch,
    path = "/conversations/{id}/title",
    tag = "Conversations",
    params(("id" = String, Path, format = "uuid")),
    request_body = UpdateTitleRequest,
    responses(
        (status = 200, description = "Renamed conversation", body = ConversationResponse),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn update_title(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(req): Json<UpdateTitleRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation = state.conversations.update_title(conversation_id, &req.title)?;
    Ok(Json(ConversationResponse::from_conversation(&conversation, false)))
}

/// POST /conversations/{id}/messages - Append a message
#[utoipa::path(
    post,
    path = "/conversations/{id}/messages",
    tag = "Conversations",
    params(("id" = String, Path, format = "uuid")),
    request_body = AddMessageRequest,
    responses(
        (status = 201, description = "Appended message", body = MessageResponse),
        (status = 400, description = "Validation failed", body = crate::error::ApiError),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn add_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(req): Json<AddMessageRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let message = state
        .conversations
        .add_message(conversation_id, req.role, &req.content, None)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))))
}

/// DELETE /conversations/{id}/messages - Clear the transcript
#[utoipa::path(
    delete,
    path = "/conversations/{id}/messages",
    tag = "Conversations",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Transcript cleared"),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
    ),
)]
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.conversations.clear_messages(conversation_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /conversations/{id}/query - Query with conversation context
///
/// Non-idempotent: the question joins the transcript before the engine runs,
/// and the answer joins it after.
#[utoipa::path(
    post,
    path = "/conversations/{id}/query",
    tag = "Query",
    params(("id" = String, Path, format = "uuid")),
    request_body = ConversationQueryRequest,
    responses(
        (status = 200, description = "The answer", body = QueryResponse),
        (status = 400, description = "Validation failed or brain has no documents", body = crate::error::ApiError),
        (status = 404, description = "Conversation not found", body = crate::error::ApiError),
        (status = 503, description = "Engine unavailable", body = crate::error::ApiError),
    ),
)]
pub async fn query_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(req): Json<ConversationQueryRequest>,
) -> ApiResult<Json<QueryResponse>> {
    let params = validate_query(
        &req.question,
        req.max_tokens_or_default(),
        req.temperature_or_default(),
    )?;
    let question = req.question.trim();

    let ctx = state.conversations.begin_query(
        conversation_id,
        question,
        req.context_window_or_default(),
    )?;

    let (answer, processing_time_ms) = state
        .executor
        .execute(&ctx.brain, question, &ctx.context, params)
        .await?;

    state
        .conversations
        .complete_query(conversation_id, &answer.text, answer.sources.clone())?;

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

/// Create the conversation router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/conversations",
            post(create_conversation).get(list_conversations),
        )
        .route(
            "/conversations/:id",
            get(get_conversation).delete(delete_conversation),
        )
        .route("/conversations/:id/title", patch(update_title))
        .route(
            "/conversations/:id/messages",
            post(add_message).delete(clear_messages),
        )
        .route("/conversations/:id/query", post(query_conversation))
}
