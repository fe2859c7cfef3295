//! Query Executor
//!
//! Synchronous query execution: boundary validation, the empty-brain
//! precondition, the engine timeout, and wall-clock reporting. Queries never
//! mutate gateway state, so any number may run concurrently against one
//! brain.

use std::sync::Arc;
use std::time::{Duration, Instant};
use synapse_core::{limits, Brain, ContextMessage};
use synapse_engine::{AnswerRequest, EngineAnswer, RetrievalEngine};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::validation::{ValidateLength, ValidateNonEmpty, ValidateRange};

/// Validated query parameters with defaults applied.
#[derive(Debug, Clone, Copy)]
pub struct QueryParams {
    pub max_tokens: i32,
    pub temperature: f32,
}

/// Validate the user-facing query fields. Called before any mutation on
/// both the sync and streaming paths.
pub fn validate_query(question: &str, max_tokens: i32, temperature: f32) -> ApiResult<QueryParams> {
    question.validate_non_empty("question")?;
    question.validate_char_len("question", 1, limits::MAX_QUESTION_LEN)?;
    max_tokens.validate_range("max_tokens", limits::MIN_MAX_TOKENS, limits::MAX_MAX_TOKENS)?;
    temperature.validate_range("temperature", 0.0, 1.0)?;
    Ok(QueryParams {
        max_tokens,
        temperature,
    })
}

/// Executes queries against the retrieval-generation engine.
pub struct QueryExecutor {
    engine: Arc<dyn RetrievalEngine>,
    timeout: Duration,
}

impl QueryExecutor {
    pub fn new(engine: Arc<dyn RetrievalEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Run one query. The brain snapshot was fetched by the caller; a brain
    /// with no documents is rejected before the engine is touched.
    pub async fn execute(
        &self,
        brain: &Brain,
        question: &str,
        context: &[ContextMessage],
        params: QueryParams,
    ) -> ApiResult<(EngineAnswer, u64)> {
        if brain.document_count == 0 {
            return Err(ApiError::empty_brain());
        }

        let start = Instant::now();
        let request = AnswerRequest {
            brain_id: brain.id,
            question,
            context,
            provider: brain.llm_provider,
            model: &brain.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let answer = match tokio::time::timeout(self.timeout, self.engine.answer(request)).await {
            Ok(result) => result.map_err(ApiError::from)?,
            Err(_) => return Err(ApiError::engine_timeout(self.timeout.as_secs())),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            brain_id = %brain.id,
            sources = answer.sources.len(),
            processing_time_ms = elapsed_ms,
            "query answered"
        );
        Ok((answer, elapsed_ms))
    }
}
