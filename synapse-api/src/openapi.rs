//! OpenAPI Documentation
//!
//! utoipa document aggregating every route and schema. Served at
//! `/openapi.json`.

use utoipa::OpenApi;

use crate::error::ApiError;
use crate::routes;
use crate::types::{
    AddMessageRequest, BrainListResponse, BrainResponse, ConversationListResponse,
    ConversationQueryRequest, ConversationResponse, CreateBrainFromTemplateRequest,
    CreateBrainRequest, CreateConversationRequest, DocumentListResponse, DocumentResponse,
    HealthResponse, MessageResponse, QueryRequest, QueryResponse, ServiceInfo, StreamEvent,
    TemplateListResponse, TemplateResponse, UpdateTitleRequest, UploadResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SYNAPSE API",
        description = "Knowledge-base gateway: brains, documents, and retrieval-augmented queries",
        version = env!("CARGO_PKG_VERSION"),
        license(name = "MIT"),
    ),
    paths(
        routes::brains::create_brain,
        routes::brains::list_brains,
        routes::brains::get_brain,
        routes::brains::delete_brain,
        routes::brains::query_brain,
        routes::documents::upload_documents,
        routes::documents::list_documents,
        routes::documents::get_document,
        routes::documents::delete_document,
        routes::streaming::stream_brain_query,
        routes::streaming::stream_conversation_query,
        routes::conversations::create_conversation,
        routes::conversations::list_conversations,
        routes::conversations::get_conversation,
        routes::conversations::delete_conversation,
        routes::conversations::update_title,
        routes::conversations::add_message,
        routes::conversations::clear_messages,
        routes::conversations::query_conversation,
        routes::templates::list_templates,
        routes::templates::get_template,
        routes::templates::create_brain_from_template,
        routes::health::health,
    ),
    components(schemas(
        ApiError,
        CreateBrainRequest,
        BrainResponse,
        BrainListResponse,
        DocumentResponse,
        DocumentListResponse,
        UploadResponse,
        QueryRequest,
        QueryResponse,
        CreateConversationRequest,
        ConversationResponse,
        ConversationListResponse,
        ConversationQueryRequest,
        AddMessageRequest,
        MessageResponse,
        UpdateTitleRequest,
        StreamEvent,
        TemplateResponse,
        TemplateListResponse,
        CreateBrainFromTemplateRequest,
        HealthResponse,
        ServiceInfo,
    )),
    tags(
        (name = "Brains", description = "Brain lifecycle"),
        (name = "Documents", description = "Document ingestion and management"),
        (name = "Query", description = "Synchronous and streaming retrieval queries"),
        (name = "Conversations", description = "Conversations and transcripts"),
        (name = "Templates", description = "Predefined brain configurations"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
