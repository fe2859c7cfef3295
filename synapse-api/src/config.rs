//! Gateway Configuration
//!
//! Environment-driven configuration with sensible defaults. All knobs are
//! read once at startup; nothing re-reads the environment at request time.

use std::path::PathBuf;

/// Runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind host (default: 0.0.0.0)
    pub host: String,

    /// Bind port (default: 8000)
    pub port: u16,

    /// Root directory for the filesystem document store
    /// (default: ./data/documents)
    pub storage_path: PathBuf,

    /// Allowed CORS origins; "*" means any (default: *)
    pub cors_origins: Vec<String>,

    /// Timeout for a single engine call in seconds (default: 60)
    pub engine_timeout_secs: u64,

    /// Provider API keys; a provider without a key is not registered.
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub mistral_api_key: Option<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SYNAPSE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SYNAPSE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            storage_path: std::env::var("SYNAPSE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/documents")),
            cors_origins: std::env::var("SYNAPSE_CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            engine_timeout_secs: std::env::var("SYNAPSE_ENGINE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            mistral_api_key: std::env::var("MISTRAL_API_KEY").ok(),
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether CORS should allow any origin.
    pub fn cors_allow_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            storage_path: PathBuf::from("./data/documents"),
            cors_origins: vec!["*".to_string()],
            engine_timeout_secs: 60,
            anthropic_api_key: None,
            openai_api_key: None,
            mistral_api_key: None,
        }
    }
}
