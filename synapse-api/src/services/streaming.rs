//! Stream Orchestrator
//!
//! Turns one engine answer into the ordered event protocol:
//! content fragments, then one sources event, then a single terminal event
//! (done or error). An engine failure at any point still produces a
//! well-formed error event and clean termination.
//!
//! The answer-to-fragment split is a `ChunkPolicy` so a natively streaming
//! engine can replace the word chunker without touching the protocol.

use futures_util::Stream;
use std::sync::Arc;
use synapse_core::{Brain, ConversationId};
use synapse_engine::ChunkPolicy;
use tracing::warn;

use crate::services::conversations::QueryContext;
use crate::services::query::{QueryExecutor, QueryParams};
use crate::services::ConversationManager;
use crate::types::StreamEvent;

/// Produces event streams for the streaming query endpoints.
pub struct StreamOrchestrator {
    executor: Arc<QueryExecutor>,
    conversations: Arc<ConversationManager>,
    chunker: Arc<dyn ChunkPolicy>,
}

impl StreamOrchestrator {
    pub fn new(
        executor: Arc<QueryExecutor>,
        conversations: Arc<ConversationManager>,
        chunker: Arc<dyn ChunkPolicy>,
    ) -> Self {
        Self {
            executor,
            conversations,
            chunker,
        }
    }

    /// Stream a one-shot brain query. The caller has already verified the
    /// brain exists, has documents, and the question validates.
    pub fn brain_stream(
        self: Arc<Self>,
        brain: Brain,
        question: String,
        params: QueryParams,
    ) -> impl Stream<Item = StreamEvent> + Send {
        self.run(brain, question, Vec::new(), params, None)
    }

    /// Stream a conversation-scoped query. `ctx` was captured by
    /// `ConversationManager::begin_query`, which already appended the user
    /// message; the assistant message is appended only when the stream
    /// reaches its done event, so an errored stream leaves no partial
    /// assistant message.
    pub fn conversation_stream(
        self: Arc<Self>,
        conversation_id: ConversationId,
        ctx: QueryContext,
        question: String,
        params: QueryParams,
    ) -> impl Stream<Item = StreamEvent> + Send {
        let QueryContext { brain, context } = ctx;
        self.run(brain, question, context, params, Some(conversation_id))
    }

    fn run(
        self: Arc<Self>,
        brain: Brain,
        question: String,
        context: Vec<synapse_core::ContextMessage>,
        params: QueryParams,
        conversation_id: Option<ConversationId>,
    ) -> impl Stream<Item = StreamEvent> + Send {
        async_stream::stream! {
            match self.executor.execute(&brain, &question, &context, params).await {
                Ok((answer, _elapsed_ms)) => {
                    for chunk in self.chunker.chunks(&answer.text) {
                        yield StreamEvent::Content { content: chunk };
                    }
                    yield StreamEvent::Sources {
                        sources: answer.sources.clone(),
                    };

                    if let Some(conversation_id) = conversation_id {
                        // The conversation may have been deleted mid-stream
                        if let Err(err) = self.conversations.complete_query(
                            conversation_id,
                            &answer.text,
                            answer.sources,
                        ) {
                            warn!(conversation_id = %conversation_id, error = %err, "failed to record answer");
                            yield StreamEvent::Error { error: err.message };
                            return;
                        }
                    }
                    yield StreamEvent::Done;
                }
                Err(err) => {
                    yield StreamEvent::Error { error: err.message };
                }
            }
        }
    }
}
