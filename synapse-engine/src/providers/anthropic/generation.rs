//! Anthropic (Claude) generation provider implementation

use super::client::AnthropicClient;
use super::types::{ContentBlock, MessageRequest, MessageResponse};
use crate::providers::{Generation, GenerationProvider, ProviderMessage};
use crate::EngineResult;
use async_trait::async_trait;

/// Anthropic generation provider using Claude models.
pub struct AnthropicGenerationProvider {
    client: AnthropicClient,
}

impl AnthropicGenerationProvider {
    /// Create a new Anthropic generation provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key, 50),
        }
    }

    /// Extract text from content blocks.
    fn extract_text(content: Vec<ContentBlock>) -> String {
        content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl GenerationProvider for AnthropicGenerationProvider {
    async fn generate(
        &self,
        model: &str,
        system: Option<String>,
        messages: Vec<ProviderMessage>,
        max_tokens: i32,
        temperature: f32,
    ) -> EngineResult<Generation> {
        let request = MessageRequest {
            model: model.to_string(),
            system,
            messages,
            max_tokens,
            temperature: Some(temperature),
        };

        let response: MessageResponse = self.client.request("messages", request).await?;
        let tokens_used = Some(response.usage.input_tokens + response.usage.output_tokens);

        Ok(Generation {
            text: Self::extract_text(response.content),
            tokens_used,
        })
    }
}

impl std::fmt::Debug for AnthropicGenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicGenerationProvider").finish()
    }
}
