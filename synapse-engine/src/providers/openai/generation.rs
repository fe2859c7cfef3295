//! OpenAI generation provider implementation

use super::client::OpenAIClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::{invalid_response, Generation, GenerationProvider, ProviderMessage};
use crate::EngineResult;
use async_trait::async_trait;

/// OpenAI generation provider using GPT models.
pub struct OpenAIGenerationProvider {
    client: OpenAIClient,
}

impl OpenAIGenerationProvider {
    /// Create a new OpenAI generation provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key, 60),
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAIGenerationProvider {
    async fn generate(
        &self,
        model: &str,
        system: Option<String>,
        messages: Vec<ProviderMessage>,
        max_tokens: i32,
        temperature: f32,
    ) -> EngineResult<Generation> {
        // Chat completions carry the system prompt as the first message.
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
            .ok_or_else(|| invalid_response("openai", "Response contained no choices"))?;

        Ok(Generation {
            text,
            tokens_used: response.usage.map(|u| u.total_tokens),
        })
    }
}

impl std::fmt::Debug for OpenAIGenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIGenerationProvider").finish()
    }
}
