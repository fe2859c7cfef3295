//! Application State
//!
//! Shared state handed to every axum handler. Services are wired once at
//! startup; handlers only see Arcs.

use std::sync::Arc;
use std::time::Duration;
use synapse_engine::{ChunkPolicy, RetrievalEngine, WordChunkPolicy};

use crate::config::GatewayConfig;
use crate::services::{
    BrainLocks, BrainRegistry, ConversationManager, DocumentService, QueryExecutor,
    StreamOrchestrator,
};
use crate::store::DocumentStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub registry: Arc<BrainRegistry>,
    pub documents: Arc<DocumentService>,
    pub conversations: Arc<ConversationManager>,
    pub executor: Arc<QueryExecutor>,
    pub streams: Arc<StreamOrchestrator>,
    pub engine: Arc<dyn RetrievalEngine>,
    pub locks: BrainLocks,
}

impl AppState {
    /// Wire the full service graph over the given engine and document store.
    pub fn new(
        config: GatewayConfig,
        engine: Arc<dyn RetrievalEngine>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self::with_chunker(config, engine, store, Arc::new(WordChunkPolicy::default()))
    }

    /// Same as [`AppState::new`] with an explicit chunking strategy.
    pub fn with_chunker(
        config: GatewayConfig,
        engine: Arc<dyn RetrievalEngine>,
        store: Arc<dyn DocumentStore>,
        chunker: Arc<dyn ChunkPolicy>,
    ) -> Self {
        let config = Arc::new(config);
        let locks = BrainLocks::new();
        let registry = Arc::new(BrainRegistry::new());
        let documents = Arc::new(DocumentService::new(
            store,
            registry.clone(),
            engine.clone(),
            locks.clone(),
        ));
        let conversations = Arc::new(ConversationManager::new(registry.clone()));
        let executor = Arc::new(QueryExecutor::new(
            engine.clone(),
            Duration::from_secs(config.engine_timeout_secs),
        ));
        let streams = Arc::new(StreamOrchestrator::new(
            executor.clone(),
            conversations.clone(),
            chunker,
        ));

        Self {
            config,
            registry,
            documents,
            conversations,
            executor,
            streams,
            engine,
            locks,
        }
    }
}
