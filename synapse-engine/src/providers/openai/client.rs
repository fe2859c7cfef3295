//! OpenAI HTTP client with rate limiting

use super::types::ApiError;
use crate::providers::{invalid_api_key, invalid_response, rate_limited, request_failed};
use crate::EngineResult;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// OpenAI-compatible API client with rate limiting.
///
/// Also used for Mistral, whose chat completions endpoint speaks the same
/// wire format under a different base URL.
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    provider_label: &'static str,
    rate_limiter: Arc<Semaphore>,
    last_request: Arc<AtomicU64>,
    min_request_interval_ms: u64,
    start_time: Instant,
}

impl OpenAIClient {
    /// Create a new client against the OpenAI API.
    pub fn new(api_key: impl Into<String>, requests_per_minute: u32) -> Self {
        Self::with_base_url(
            api_key,
            requests_per_minute,
            "https://api.openai.com/v1",
            "openai",
        )
    }

    /// Create a client against a compatible API at another base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        requests_per_minute: u32,
        base_url: impl Into<String>,
        provider_label: &'static str,
    ) -> Self {
        let rpm = requests_per_minute.max(1);
        let min_interval_ms = (60_000 / rpm as u64).max(10);

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            provider_label,
            rate_limiter: Arc::new(Semaphore::new(rpm as usize)),
            last_request: Arc::new(AtomicU64::new(0)),
            min_request_interval_ms: min_interval_ms,
            start_time: Instant::now(),
        }
    }

    /// Make an API request with automatic rate limiting.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Req,
    ) -> EngineResult<Res> {
        let label = self.provider_label;

        // Rate limiting: acquire permit
        let _permit = self
            .rate_limiter
            .acquire()
            .await
            .map_err(|e| request_failed(label, 0, format!("Rate limiter error: {}", e)))?;

        // Enforce minimum interval between requests
        let now_ms = self.start_time.elapsed().as_millis() as u64;
        let last_ms = self.last_request.load(Ordering::Relaxed);
        let elapsed = now_ms.saturating_sub(last_ms);

        if elapsed < self.min_request_interval_ms {
            let wait_ms = self.min_request_interval_ms - elapsed;
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }

        self.last_request.store(now_ms, Ordering::Relaxed);

        // Make HTTP request
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| request_failed(label, 0, format!("HTTP request failed: {}", e)))?;

        // Handle response
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| invalid_response(label, format!("Failed to parse response: {}", e)))
        } else {
            // Parse error response
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_msg = if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                api_error.error.message
            } else {
                error_text
            };

            Err(match status {
                StatusCode::TOO_MANY_REQUESTS => rate_limited(label),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => invalid_api_key(label),
                _ => request_failed(label, status.as_u16(), error_msg),
            })
        }
    }
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
