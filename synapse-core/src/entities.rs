//! Core entity structures

use crate::{
    new_entity_id, BrainId, ConversationId, LlmProvider, MessageId, MessageRole, Timestamp,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Brain - a named, independent knowledge base.
///
/// `document_count` is derived state: it must equal the number of documents
/// currently stored for the brain at all observable times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Brain {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: BrainId,
    pub name: String,
    pub description: Option<String>,
    pub llm_provider: LlmProvider,
    pub model: String,
    pub document_count: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Brain {
    /// Create a brain with a fresh id, zero documents, and now-timestamps.
    /// When `model` is None the provider's default model is used.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        llm_provider: LlmProvider,
        model: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entity_id(),
            name: name.into(),
            description,
            llm_provider,
            model: model.unwrap_or_else(|| llm_provider.default_model().to_string()),
            document_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Metadata for a stored document. The raw bytes live in the document store,
/// keyed by (brain id, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DocumentMeta {
    /// Unique within the owning brain.
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub modified_at: Timestamp,
    /// Storage path relative to the document store root.
    pub path: String,
}

/// A single message in a conversation transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
    /// Citations for assistant messages; None for user messages.
    pub sources: Option<Vec<String>>,
}

/// Message in the shape handed to the retrieval-generation engine as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContextMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Conversation - an ordered transcript scoped to one brain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Conversation {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: ConversationId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub brain_id: BrainId,
    pub title: String,
    pub messages: Vec<Message>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Conversation {
    /// Create an empty conversation. A missing title defaults to
    /// `Conversation <first 8 hex chars of the id>`.
    pub fn new(brain_id: BrainId, title: Option<String>) -> Self {
        let id = new_entity_id();
        let now = Utc::now();
        Self {
            id,
            brain_id,
            title: title.unwrap_or_else(|| format!("Conversation {}", &id.simple().to_string()[..8])),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message. Transcript timestamps are forced strictly
    /// increasing even when the clock does not advance between appends.
    pub fn add_message(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        sources: Option<Vec<String>>,
    ) -> Message {
        let mut timestamp = Utc::now();
        if let Some(last) = self.messages.last() {
            if timestamp <= last.timestamp {
                timestamp = last.timestamp + Duration::microseconds(1);
            }
        }

        let message = Message {
            id: new_entity_id(),
            role,
            content: content.into(),
            timestamp,
            sources,
        };
        self.messages.push(message.clone());
        self.updated_at = timestamp;
        message
    }

    /// Context window for the engine: the most recent `max_messages`
    /// messages, oldest first.
    pub fn context(&self, max_messages: usize) -> Vec<ContextMessage> {
        let skip = self.messages.len().saturating_sub(max_messages);
        self.messages[skip..]
            .iter()
            .map(|m| ContextMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }

    /// Empty the transcript without deleting the conversation.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }
}
