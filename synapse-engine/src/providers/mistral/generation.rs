//! Mistral generation provider implementation
//!
//! Mistral exposes an OpenAI-compatible chat completions endpoint, so this
//! provider reuses the OpenAI client and wire types against the Mistral
//! base URL.

use crate::providers::openai::client::OpenAIClient;
use crate::providers::openai::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::{invalid_response, Generation, GenerationProvider, ProviderMessage};
use crate::EngineResult;
use async_trait::async_trait;

const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Mistral generation provider.
pub struct MistralGenerationProvider {
    client: OpenAIClient,
}

impl MistralGenerationProvider {
    /// Create a new Mistral generation provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, 60, MISTRAL_BASE_URL, "mistral"),
        }
    }
}

#[async_trait]
impl GenerationProvider for MistralGenerationProvider {
    async fn generate(
        &self,
        model: &str,
        system: Option<String>,
        messages: Vec<ProviderMessage>,
        max_tokens: i32,
        temperature: f32,
    ) -> EngineResult<Generation> {
        let mut wire_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system {
            wire_messages.push(ProviderMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        wire_messages.extend(messages);

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: wire_messages,
            max_tokens,
            temperature: Some(temperature),
        };

        let response: ChatCompletionResponse =
            self.client.request("chat/completions", request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| invalid_response("mistral", "Response contained no choices"))?;

        Ok(Generation {
            text,
            tokens_used: response.usage.map(|u| u.total_tokens),
        })
    }
}

impl std::fmt::Debug for MistralGenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralGenerationProvider").finish()
    }
}
