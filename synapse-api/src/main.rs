//! SYNAPSE Gateway Binary
//!
//! Wires configuration, telemetry, the retrieval-augmented engine with its
//! configured providers, and the filesystem document store, then serves the
//! REST API.

use std::sync::Arc;
use synapse_api::routes::create_app;
use synapse_api::store::FsDocumentStore;
use synapse_api::{telemetry, AppState, GatewayConfig};
use synapse_core::LlmProvider;
use synapse_engine::{
    AnthropicGenerationProvider, MistralGenerationProvider, OpenAIGenerationProvider, RagEngine,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_telemetry();

    let config = GatewayConfig::from_env();
    let engine = Arc::new(build_engine(&config));
    let store = Arc::new(FsDocumentStore::new(config.storage_path.clone()));

    let addr = config.bind_addr();
    let state = AppState::new(config, engine, store);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "SYNAPSE gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the engine with one generation provider per configured API key.
fn build_engine(config: &GatewayConfig) -> RagEngine {
    let mut engine = RagEngine::new();

    if let Some(key) = &config.anthropic_api_key {
        engine = engine.with_provider(
            LlmProvider::Anthropic,
            Arc::new(AnthropicGenerationProvider::new(key.clone())),
        );
        info!("anthropic provider configured");
    }
    if let Some(key) = &config.openai_api_key {
        engine = engine.with_provider(
            LlmProvider::Openai,
            Arc::new(OpenAIGenerationProvider::new(key.clone())),
        );
        info!("openai provider configured");
    }
    if let Some(key) = &config.mistral_api_key {
        engine = engine.with_provider(
            LlmProvider::Mistral,
            Arc::new(MistralGenerationProvider::new(key.clone())),
        );
        info!("mistral provider configured");
    }

    if config.anthropic_api_key.is_none()
        && config.openai_api_key.is_none()
        && config.mistral_api_key.is_none()
    {
        warn!("no provider API keys configured; queries will fail until one is set");
    }

    engine
}
