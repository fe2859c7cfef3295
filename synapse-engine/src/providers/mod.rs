//! LLM provider implementations
//!
//! Concrete generation backends for the retrieval-generation engine.
//! Each provider wraps an HTTP client with rate limiting and maps provider
//! error responses onto the shared error taxonomy.

use async_trait::async_trait;
use synapse_core::EngineError;

use crate::EngineResult;

pub mod anthropic;
pub mod mistral;
pub mod openai;

pub use anthropic::AnthropicGenerationProvider;
pub use mistral::MistralGenerationProvider;
pub use openai::OpenAIGenerationProvider;

// ============================================================================
// GENERATION PROVIDER TRAIT
// ============================================================================

/// Message in provider wire format.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProviderMessage {
    pub role: String,
    pub content: String,
}

/// One completed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub tokens_used: Option<i64>,
}

/// A generation backend. Implementations must be thread-safe.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Run one completion. `messages` is the chat transcript oldest first;
    /// `system` carries retrieval grounding and instructions.
    async fn generate(
        &self,
        model: &str,
        system: Option<String>,
        messages: Vec<ProviderMessage>,
        max_tokens: i32,
        temperature: f32,
    ) -> EngineResult<Generation>;
}

// ============================================================================
// ERROR HELPERS
// ============================================================================

pub(crate) fn request_failed(
    provider: &str,
    status: u16,
    message: impl Into<String>,
) -> EngineError {
    EngineError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn rate_limited(provider: &str) -> EngineError {
    EngineError::RateLimited {
        provider: provider.to_string(),
    }
}

pub(crate) fn invalid_api_key(provider: &str) -> EngineError {
    EngineError::InvalidApiKey {
        provider: provider.to_string(),
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}
