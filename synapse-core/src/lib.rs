//! SYNAPSE Core - Entity Types
//!
//! Pure data structures shared by the gateway and the retrieval-generation
//! engine. This crate contains only data types and the error taxonomy - no
//! business logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod entities;
pub mod enums;
pub mod error;

pub use entities::{Brain, Conversation, ContextMessage, DocumentMeta, Message};
pub use enums::{EntityKind, LlmProvider, MessageRole};
pub use error::{EngineError, StorageError};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Brain identifier.
pub type BrainId = Uuid;

/// Conversation identifier.
pub type ConversationId = Uuid;

/// Message identifier.
pub type MessageId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new random entity id.
pub fn new_entity_id() -> Uuid {
    Uuid::new_v4()
}

// ============================================================================
// VALIDATION LIMITS
// ============================================================================

/// Boundary limits enforced before any state mutation.
pub mod limits {
    /// Brain name: 1..=100 characters.
    pub const MAX_BRAIN_NAME_LEN: usize = 100;

    /// Brain description: up to 500 characters.
    pub const MAX_BRAIN_DESCRIPTION_LEN: usize = 500;

    /// Question: 1..=2000 characters.
    pub const MAX_QUESTION_LEN: usize = 2000;

    /// max_tokens: 100..=4096, default 1024.
    pub const MIN_MAX_TOKENS: i32 = 100;
    pub const MAX_MAX_TOKENS: i32 = 4096;
    pub const DEFAULT_MAX_TOKENS: i32 = 1024;

    /// temperature: 0.0..=1.0, default 0.7.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Upload batch: 1..=20 files, each up to 50MB.
    pub const MAX_UPLOAD_FILES: usize = 20;
    pub const MAX_UPLOAD_FILE_BYTES: u64 = 50 * 1024 * 1024;

    /// Message content: 1..=10_000 characters.
    pub const MAX_MESSAGE_CONTENT_LEN: usize = 10_000;

    /// Conversation title: 1..=200 characters.
    pub const MAX_CONVERSATION_TITLE_LEN: usize = 200;

    /// Conversation context window: 1..=50 most recent messages, default 10.
    pub const MAX_CONTEXT_MESSAGES: usize = 50;
    pub const DEFAULT_CONTEXT_MESSAGES: usize = 10;

    /// File types accepted for ingestion. Both the file extension and the
    /// declared content type must match this list.
    pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "doc", "docx", "csv", "json"];

    /// Content types matching the extension allow-list.
    pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
        "application/pdf",
        "text/plain",
        "text/markdown",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "text/csv",
        "application/json",
        "application/octet-stream",
    ];
}
