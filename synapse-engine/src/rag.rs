//! Retrieval-augmented generation engine
//!
//! Holds an in-process document index per brain and composes a grounding
//! system prompt from indexed content before delegating generation to the
//! configured provider. Source attribution ranks indexed documents by term
//! overlap with the question.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use synapse_core::{BrainId, EngineError, LlmProvider, MessageRole};
use tracing::{debug, instrument};

use crate::providers::{GenerationProvider, ProviderMessage};
use crate::{AnswerRequest, EngineAnswer, EngineResult, IndexDocument, RetrievalEngine};

/// Characters of document content carried into the grounding prompt.
const EXCERPT_CHARS: usize = 2000;

/// Maximum sources cited per answer.
const MAX_SOURCES: usize = 5;

#[derive(Debug, Clone)]
struct IndexedDoc {
    name: String,
    excerpt: String,
}

impl IndexedDoc {
    fn from_document(doc: &IndexDocument) -> Self {
        let text = String::from_utf8_lossy(&doc.bytes);
        let excerpt = text.chars().take(EXCERPT_CHARS).collect();
        Self {
            name: doc.name.clone(),
            excerpt,
        }
    }
}

/// Retrieval-augmented generation engine backed by pluggable providers.
pub struct RagEngine {
    providers: HashMap<LlmProvider, Arc<dyn GenerationProvider>>,
    index: RwLock<HashMap<BrainId, Vec<IndexedDoc>>>,
}

impl RagEngine {
    /// Create an engine with no providers configured. `health` fails until
    /// at least one provider is registered.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            index: RwLock::new(HashMap::new()),
        }
    }

    /// Register a generation provider for a provider kind.
    pub fn with_provider(
        mut self,
        kind: LlmProvider,
        provider: Arc<dyn GenerationProvider>,
    ) -> Self {
        self.providers.insert(kind, provider);
        self
    }

    fn provider(&self, kind: LlmProvider) -> EngineResult<Arc<dyn GenerationProvider>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| EngineError::ProviderNotConfigured {
                provider: kind.as_str().to_string(),
            })
    }

    fn indexed_docs(&self, brain_id: BrainId) -> EngineResult<Vec<IndexedDoc>> {
        let map = self.index.read().map_err(|_| EngineError::InvalidResponse {
            provider: "rag".to_string(),
            reason: "index lock poisoned".to_string(),
        })?;
        Ok(map.get(&brain_id).cloned().unwrap_or_default())
    }

    /// Compose the grounding system prompt from indexed excerpts.
    fn system_prompt(docs: &[IndexedDoc]) -> String {
        let mut prompt = String::from(
            "You are a knowledge-base assistant. Answer the user's question \
             using only the documents below. If the documents do not contain \
             the answer, say so.\n",
        );
        for doc in docs {
            prompt.push_str("\n--- Document: ");
            prompt.push_str(&doc.name);
            prompt.push_str(" ---\n");
            prompt.push_str(&doc.excerpt);
            prompt.push('\n');
        }
        prompt
    }

    /// Rank documents by question term overlap. Documents with no overlap
    /// are still cited, after overlapping ones, so every answer carries
    /// attribution back to the brain's content.
    fn rank_sources(question: &str, docs: &[IndexedDoc]) -> Vec<String> {
        let terms: Vec<String> = question
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| w.len() > 2)
            .collect();

        let mut scored: Vec<(usize, &IndexedDoc)> = docs
            .iter()
            .map(|doc| {
                let haystack = doc.excerpt.to_lowercase();
                let score = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                (score, doc)
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_SOURCES)
            .map(|(_, doc)| doc.name.clone())
            .collect()
    }
}

impl Default for RagEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalEngine for RagEngine {
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn index(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()> {
        let mut map = self.index.write().map_err(|_| EngineError::InvalidResponse {
            provider: "rag".to_string(),
            reason: "index lock poisoned".to_string(),
        })?;
        let entry = map.entry(brain_id).or_default();
        for doc in documents {
            entry.push(IndexedDoc::from_document(doc));
        }
        debug!(brain_id = %brain_id, total = entry.len(), "indexed documents");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn reindex(&self, brain_id: BrainId, documents: &[IndexDocument]) -> EngineResult<()> {
        let mut map = self.index.write().map_err(|_| EngineError::InvalidResponse {
            provider: "rag".to_string(),
            reason: "index lock poisoned".to_string(),
        })?;
        map.insert(
            brain_id,
            documents.iter().map(IndexedDoc::from_document).collect(),
        );
        Ok(())
    }

    async fn remove(&self, brain_id: BrainId) -> EngineResult<()> {
        if let Ok(mut map) = self.index.write() {
            map.remove(&brain_id);
        }
        Ok(())
    }

    #[instrument(skip(self, request), fields(brain_id = %request.brain_id))]
    async fn answer(&self, request: AnswerRequest<'_>) -> EngineResult<EngineAnswer> {
        let provider = self.provider(request.provider)?;
        let docs = self.indexed_docs(request.brain_id)?;

        let system = Self::system_prompt(&docs);

        // Transcript: prior turns oldest first, then the current question.
        let mut messages: Vec<ProviderMessage> = request
            .context
            .iter()
            .map(|m| ProviderMessage {
                role: match m.role {
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();
        messages.push(ProviderMessage {
            role: "user".to_string(),
            content: request.question.to_string(),
        });

        let generation = provider
            .generate(
                request.model,
                Some(system),
                messages,
                request.max_tokens,
                request.temperature,
            )
            .await?;

        Ok(EngineAnswer {
            sources: Self::rank_sources(request.question, &docs),
            text: generation.text,
            tokens_used: generation.tokens_used,
        })
    }

    async fn health(&self) -> EngineResult<()> {
        if self.providers.is_empty() {
            return Err(EngineError::ProviderNotConfigured {
                provider: "any".to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for RagEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagEngine")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
