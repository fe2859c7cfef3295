//! SYNAPSE Engine - Retrieval-Generation Abstraction Layer
//!
//! Provider-agnostic traits for answering questions over an indexed brain.
//! This crate defines the interfaces the gateway consumes plus concrete
//! provider implementations (Anthropic, OpenAI, Mistral) and a mock engine
//! for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use synapse_core::{BrainId, ContextMessage, EngineError, LlmProvider};

pub mod providers;
pub mod rag;

pub use providers::{
    AnthropicGenerationProvider, MistralGenerationProvider, OpenAIGenerationProvider,
};
pub use rag::RagEngine;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// RETRIEVAL-GENERATION ENGINE TRAIT
// ============================================================================

/// A document handed to the engine for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    /// Name unique within the brain; doubles as the citation string.
    pub name: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

/// One retrieval-generation invocation.
#[derive(Debug, Clone)]
pub struct AnswerRequest<'a> {
    pub brain_id: BrainId,
    pub question: &'a str,
    /// Prior conversation turns, oldest first. Empty for one-shot queries.
    pub context: &'a [ContextMessage],
    /// The owning brain's generation configuration.
    pub provider: LlmProvider,
    pub model: &'a str,
    pub max_tokens: i32,
    pub temperature: f32,
}

/// Engine output for one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineAnswer {
    pub text: String,
    /// Citation strings, in relevance order.
    pub sources: Vec<String>,
    /// Not all providers report token usage.
    pub tokens_used: Option<i64>,
}

/// Retrieval-generation engine consumed by the gateway.
///
/// Implementations must be thread-safe (Send + Sync). The gateway serializes
/// index/reindex per brain; `answer` may be called concurrently.
#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    /// Add new documents to a brain's index.
    async fn index(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()>;

    /// Replace a brain's index with the given surviving document set.
    /// Called after document deletion so stale content cannot be retrieved.
    async fn reindex(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()>;

    /// Drop all indexed state for a brain (brain deletion cascade).
    async fn remove(&self, brain_id: BrainId) -> EngineResult<()>;

    /// Answer a question against a brain's index.
    async fn answer(&self, request: AnswerRequest<'_>) -> EngineResult<EngineAnswer>;

    /// Cheap reachability/configuration check for health reporting.
    async fn health(&self) -> EngineResult<()>;
}

// ============================================================================
// CHUNK POLICY
// ============================================================================

/// Strategy for slicing a complete answer into streamed content fragments.
///
/// The stream orchestrator is parameterized over this so a native
/// token-streaming engine can be substituted later without changing the
/// event-ordering contract.
pub trait ChunkPolicy: Send + Sync {
    /// Split `answer` into ordered fragments whose concatenation carries the
    /// full answer text. Policies may normalize whitespace between fragments.
    fn chunks(&self, answer: &str) -> Vec<String>;
}

/// Word-boundary chunking targeting a fixed fragment count.
///
/// Continuation fragments carry their separating space, so concatenation
/// reproduces the answer with interior whitespace runs collapsed to single
/// spaces.
#[derive(Debug, Clone)]
pub struct WordChunkPolicy {
    target_chunks: usize,
}

impl WordChunkPolicy {
    pub fn new(target_chunks: usize) -> Self {
        Self {
            target_chunks: target_chunks.max(1),
        }
    }
}

impl Default for WordChunkPolicy {
    fn default() -> Self {
        Self::new(20)
    }
}

impl ChunkPolicy for WordChunkPolicy {
    fn chunks(&self, answer: &str) -> Vec<String> {
        let words: Vec<&str> = answer.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let chunk_size = (words.len() / self.target_chunks).max(1);
        let mut out = Vec::new();
        for (i, window) in words.chunks(chunk_size).enumerate() {
            let mut chunk = window.join(" ");
            if i > 0 {
                chunk.insert(0, ' ');
            }
            out.push(chunk);
        }
        out
    }
}

// ============================================================================
// MOCK ENGINE FOR TESTING
// ============================================================================

/// Mock retrieval-generation engine.
///
/// Tracks indexed document names per brain and answers with a canned text
/// citing the currently indexed documents. Used by gateway tests; kept here
/// so integration tests across crates can share it.
#[derive(Debug)]
pub struct MockEngine {
    answer_text: String,
    tokens_used: Option<i64>,
    fail_answers: std::sync::atomic::AtomicBool,
    indexed: RwLock<HashMap<BrainId, Vec<String>>>,
    answer_calls: AtomicUsize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::with_answer("The answer is derived from the indexed documents.")
    }

    pub fn with_answer(text: impl Into<String>) -> Self {
        Self {
            answer_text: text.into(),
            tokens_used: Some(42),
            fail_answers: std::sync::atomic::AtomicBool::new(false),
            indexed: RwLock::new(HashMap::new()),
            answer_calls: AtomicUsize::new(0),
        }
    }

    /// Make subsequent `answer` calls fail with a provider error.
    pub fn set_failing(&self, failing: bool) {
        self.fail_answers.store(failing, Ordering::Relaxed);
    }

    /// Number of `answer` invocations so far.
    pub fn answer_calls(&self) -> usize {
        self.answer_calls.load(Ordering::Relaxed)
    }

    /// Currently indexed document names for a brain.
    pub fn indexed_documents(&self, brain_id: BrainId) -> Vec<String> {
        self.indexed
            .read()
            .map(|m| m.get(&brain_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalEngine for MockEngine {
    async fn index(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()> {
        let mut map = self.indexed.write().map_err(|_| EngineError::InvalidResponse {
            provider: "mock".to_string(),
            reason: "index lock poisoned".to_string(),
        })?;
        let entry = map.entry(brain_id).or_default();
        for doc in documents {
            entry.push(doc.name.clone());
        }
        Ok(())
    }

    async fn reindex(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()> {
        let mut map = self.indexed.write().map_err(|_| EngineError::InvalidResponse {
            provider: "mock".to_string(),
            reason: "index lock poisoned".to_string(),
        })?;
        map.insert(brain_id, documents.iter().map(|d| d.name.clone()).collect());
        Ok(())
    }

    async fn remove(&self, brain_id: BrainId) -> EngineResult<()> {
        if let Ok(mut map) = self.indexed.write() {
            map.remove(&brain_id);
        }
        Ok(())
    }

    async fn answer(&self, request: AnswerRequest<'_>) -> EngineResult<EngineAnswer> {
        self.answer_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_answers.load(Ordering::Relaxed) {
            return Err(EngineError::RequestFailed {
                provider: request.provider.as_str().to_string(),
                status: 500,
                message: "mock engine failure".to_string(),
            });
        }

        Ok(EngineAnswer {
            text: self.answer_text.clone(),
            sources: self.indexed_documents(request.brain_id),
            tokens_used: self.tokens_used,
        })
    }

    async fn health(&self) -> EngineResult<()> {
        Ok(())
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::new_entity_id;

    fn doc(name: &str) -> IndexDocument {
        IndexDocument {
            name: name.to_string(),
            bytes: b"content".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_mock_engine_index_then_answer_cites_docs() {
        let engine = MockEngine::new();
        let brain_id = new_entity_id();
        engine
            .index(brain_id, &[doc("a.pdf"), doc("b.txt")])
            .await
            .unwrap();

        let answer = engine
            .answer(AnswerRequest {
                brain_id,
                question: "what?",
                context: &[],
                provider: LlmProvider::Anthropic,
                model: "claude-3-5-sonnet-20241022",
                max_tokens: 1024,
                temperature: 0.7,
            })
            .await
            .unwrap();

        assert_eq!(answer.sources, vec!["a.pdf", "b.txt"]);
        assert_eq!(engine.answer_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_engine_reindex_drops_stale_docs() {
        let engine = MockEngine::new();
        let brain_id = new_entity_id();
        engine
            .index(brain_id, &[doc("a.pdf"), doc("b.txt")])
            .await
            .unwrap();
        engine.reindex(brain_id, &[doc("b.txt")]).await.unwrap();

        assert_eq!(engine.indexed_documents(brain_id), vec!["b.txt"]);
    }

    #[tokio::test]
    async fn test_mock_engine_remove() {
        let engine = MockEngine::new();
        let brain_id = new_entity_id();
        engine.index(brain_id, &[doc("a.pdf")]).await.unwrap();
        engine.remove(brain_id).await.unwrap();
        assert!(engine.indexed_documents(brain_id).is_empty());
    }

    #[test]
    fn test_word_chunks_concatenation_roundtrip() {
        let policy = WordChunkPolicy::default();
        let answer = "one two three four five six seven eight nine ten";
        let chunks = policy.chunks(answer);
        assert!(!chunks.is_empty());
        assert_eq!(chunks.concat(), answer);
    }

    #[test]
    fn test_word_chunks_normalize_interior_whitespace() {
        let policy = WordChunkPolicy::default();
        let answer = "first  line\nsecond\t line";
        let chunks = policy.chunks(answer);
        assert_eq!(chunks.concat(), "first line second line");
    }

    #[test]
    fn test_word_chunks_empty_answer() {
        let policy = WordChunkPolicy::default();
        assert!(policy.chunks("").is_empty());
        assert!(policy.chunks("   ").is_empty());
    }

    #[test]
    fn test_word_chunks_short_answer_single_word_chunks() {
        let policy = WordChunkPolicy::new(20);
        let chunks = policy.chunks("just three words");
        assert_eq!(chunks, vec!["just", " three", " words"]);
    }
}
