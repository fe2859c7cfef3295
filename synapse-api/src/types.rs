//! Request and Response Types for the SYNAPSE API
//!
//! Wire-format DTOs for all endpoints. Entities from `synapse-core` are
//! converted into response shapes here so internal fields never leak.

use serde::{Deserialize, Serialize};
use synapse_core::{
    limits, Brain, Conversation, DocumentMeta, LlmProvider, Message, MessageRole,
};
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================================
// BRAIN TYPES
// ============================================================================

/// Request to create a new brain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBrainRequest {
    /// Brain name, 1-100 characters
    pub name: String,

    /// Optional description, up to 500 characters
    #[serde(default)]
    pub description: Option<String>,

    /// Generation provider; defaults to anthropic
    #[serde(default)]
    pub llm_provider: Option<LlmProvider>,

    /// Model name; defaults to the provider's standard model
    #[serde(default)]
    pub model: Option<String>,
}

/// A brain as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrainResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub llm_provider: LlmProvider,
    pub model: String,
    pub document_count: i64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: synapse_core::Timestamp,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: synapse_core::Timestamp,
}

impl From<&Brain> for BrainResponse {
    fn from(brain: &Brain) -> Self {
        Self {
            id: brain.id,
            name: brain.name.clone(),
            description: brain.description.clone(),
            llm_provider: brain.llm_provider,
            model: brain.model.clone(),
            document_count: brain.document_count,
            created_at: brain.created_at,
            updated_at: brain.updated_at,
        }
    }
}

/// List of brains with total count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrainListResponse {
    pub brains: Vec<BrainResponse>,
    pub total: usize,
}

// ============================================================================
// TEMPLATE TYPES
// ============================================================================

/// A predefined brain configuration as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub llm_provider: LlmProvider,
    pub model: String,
    pub suggested_temperature: f32,
    pub use_cases: Vec<String>,
}

impl From<&crate::services::BrainTemplate> for TemplateResponse {
    fn from(template: &crate::services::BrainTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            llm_provider: template.llm_provider,
            model: template.model.to_string(),
            suggested_temperature: template.suggested_temperature,
            use_cases: template.use_cases.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The template catalog with total count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateResponse>,
    pub total: usize,
}

/// Request to create a brain from a template. The template supplies the
/// provider and model; the description falls back to the template's when
/// not given.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBrainFromTemplateRequest {
    /// Brain name, 1-100 characters
    pub name: String,

    /// Optional description, up to 500 characters
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// DOCUMENT TYPES
// ============================================================================

/// A stored document as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: synapse_core::Timestamp,
    #[schema(value_type = String, format = "date-time")]
    pub modified_at: synapse_core::Timestamp,
}

impl From<&DocumentMeta> for DocumentResponse {
    fn from(meta: &DocumentMeta) -> Self {
        Self {
            name: meta.name.clone(),
            size: meta.size,
            content_type: meta.content_type.clone(),
            created_at: meta.created_at,
            modified_at: meta.modified_at,
        }
    }
}

/// Result of a successful document upload. The whole batch persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Per-file metadata, in upload order. Names may carry collision
    /// suffixes (`report-1.pdf`) when the original name was taken.
    pub files: Vec<DocumentResponse>,

    /// The brain's document count after the upload.
    pub document_count: i64,
}

/// List of documents in a brain with total count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub total: usize,
}

// ============================================================================
// QUERY TYPES
// ============================================================================

/// A retrieval query against a brain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// Question, 1-2000 characters
    pub question: String,

    /// Generation budget, 100-4096; defaults to 1024
    #[serde(default)]
    pub max_tokens: Option<i32>,

    /// Sampling temperature, 0.0-1.0; defaults to 0.7
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl QueryRequest {
    pub fn max_tokens_or_default(&self) -> i32 {
        self.max_tokens.unwrap_or(limits::DEFAULT_MAX_TOKENS)
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(limits::DEFAULT_TEMPERATURE)
    }
}

/// Answer to a retrieval query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub answer: String,
    /// Cited document names, relevance-ordered.
    pub sources: Vec<String>,
    /// Null when the provider does not report usage.
    pub tokens_used: Option<i64>,
    /// Wall-clock time for the whole query.
    pub processing_time_ms: u64,
}

// ============================================================================
// CONVERSATION TYPES
// ============================================================================

/// Request to create a conversation scoped to a brain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConversationRequest {
    #[schema(value_type = String, format = "uuid")]
    pub brain_id: Uuid,

    /// Optional title, 1-200 characters; autogenerated when absent
    #[serde(default)]
    pub title: Option<String>,
}

/// A message as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: synapse_core::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content.clone(),
            timestamp: message.timestamp,
            sources: message.sources.clone(),
        }
    }
}

/// A conversation as returned by the API. Messages are included only when
/// explicitly requested.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub brain_id: Uuid,
    pub title: String,
    pub message_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageResponse>>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: synapse_core::Timestamp,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: synapse_core::Timestamp,
}

impl ConversationResponse {
    pub fn from_conversation(conversation: &Conversation, include_messages: bool) -> Self {
        Self {
            id: conversation.id,
            brain_id: conversation.brain_id,
            title: conversation.title.clone(),
            message_count: conversation.messages.len(),
            messages: include_messages
                .then(|| conversation.messages.iter().map(MessageResponse::from).collect()),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

/// List of conversations with total count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationResponse>,
    pub total: usize,
}

/// Request to append a message to a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddMessageRequest {
    pub role: MessageRole,

    /// Message content, 1-10000 characters
    pub content: String,
}

/// Query within a conversation; prior turns become engine context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationQueryRequest {
    /// Question, 1-2000 characters
    pub question: String,

    /// Generation budget, 100-4096; defaults to 1024
    #[serde(default)]
    pub max_tokens: Option<i32>,

    /// Sampling temperature, 0.0-1.0; defaults to 0.7
    #[serde(default)]
    pub temperature: Option<f32>,

    /// How many recent messages to hand the engine, 1-50; defaults to 10
    #[serde(default)]
    pub max_context_messages: Option<usize>,
}

impl ConversationQueryRequest {
    pub fn max_tokens_or_default(&self) -> i32 {
        self.max_tokens.unwrap_or(limits::DEFAULT_MAX_TOKENS)
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(limits::DEFAULT_TEMPERATURE)
    }

    pub fn context_window_or_default(&self) -> usize {
        self.max_context_messages
            .unwrap_or(limits::DEFAULT_CONTEXT_MESSAGES)
    }
}

/// Request to rename a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTitleRequest {
    /// New title, 1-200 characters
    pub title: String,
}

/// Filter parameters for conversation listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ConversationListParams {
    #[param(value_type = Option<String>, format = "uuid")]
    pub brain_id: Option<Uuid>,
}

/// Query parameters for fetching one conversation.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ConversationGetParams {
    #[serde(default)]
    pub include_messages: bool,
}

// ============================================================================
// STREAMING TYPES
// ============================================================================

/// One event in a streaming query response.
///
/// Ordering contract: zero or more `content` events, then exactly one
/// `sources` event, then `done`. `error` is terminal from any point and a
/// stream carries exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// An answer fragment.
    Content { content: String },
    /// Citations, emitted once after all content.
    Sources { sources: Vec<String> },
    /// Successful terminal event.
    Done,
    /// Failed terminal event.
    Error { error: String },
}

// ============================================================================
// HEALTH TYPES
// ============================================================================

/// Aggregate health report for the gateway and its engine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when every component is healthy, "degraded" otherwise.
    pub status: String,
    /// "ok" or the engine failure description.
    pub engine: String,
    pub version: String,
}

/// Service banner for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_defaults() {
        let req: QueryRequest = serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        assert_eq!(req.max_tokens_or_default(), 1024);
        assert_eq!(req.temperature_or_default(), 0.7);
    }

    #[test]
    fn test_conversation_query_context_default() {
        let req: ConversationQueryRequest =
            serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        assert_eq!(req.context_window_or_default(), 10);
    }

    #[test]
    fn test_stream_event_wire_shape() {
        let event = StreamEvent::Content {
            content: "hello".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["content"], "hello");

        let done = serde_json::to_value(&StreamEvent::Done).unwrap();
        assert_eq!(done["type"], "done");

        let sources = serde_json::to_value(&StreamEvent::Sources {
            sources: vec!["a.pdf".to_string()],
        })
        .unwrap();
        assert_eq!(sources["sources"][0], "a.pdf");
    }

    #[test]
    fn test_conversation_response_hides_messages_by_default() {
        let mut conv = Conversation::new(synapse_core::new_entity_id(), None);
        conv.add_message(MessageRole::User, "hi", None);

        let without = ConversationResponse::from_conversation(&conv, false);
        assert!(without.messages.is_none());
        assert_eq!(without.message_count, 1);

        let with = ConversationResponse::from_conversation(&conv, true);
        assert_eq!(with.messages.unwrap().len(), 1);
    }
}
