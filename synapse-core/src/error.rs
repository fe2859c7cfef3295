//! Error types for SYNAPSE operations

use crate::EntityKind;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },

    #[error("invalid document name: {name}")]
    InvalidName { name: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("document_count for brain {brain_id} would become negative")]
    NegativeDocumentCount { brain_id: String },

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Retrieval-generation engine errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no engine provider configured for {provider}")]
    ProviderNotConfigured { provider: String },

    #[error("request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("invalid API key for {provider}")]
    InvalidApiKey { provider: String },

    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("engine call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
