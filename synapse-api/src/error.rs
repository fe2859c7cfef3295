//! Error Types for the SYNAPSE API
//!
//! This module defines error handling for the gateway layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors serialize as `{"error": "...", "detail": ..., "request_id": ...}`
//! with the HTTP status derived from the error code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use synapse_core::{EngineError, EntityKind, StorageError};

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each code maps to a specific HTTP status. The code itself is internal;
/// the wire format carries only the human-readable message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Required field is missing from request
    MissingField,

    /// Field value is out of valid range
    InvalidRange,

    /// Field format is incorrect
    InvalidFormat,

    /// Query rejected because the brain has no documents
    EmptyBrain,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested brain does not exist
    BrainNotFound,

    /// Requested document does not exist
    DocumentNotFound,

    /// Requested conversation does not exist
    ConversationNotFound,

    /// Requested brain template does not exist
    TemplateNotFound,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Retrieval-generation engine is unreachable or failing
    EngineUnavailable,

    /// Engine call exceeded the configured timeout
    EngineTimeout,

    /// Internal server error
    #[default]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Validation errors, including the empty-brain precondition
            ErrorCode::ValidationFailed
            | ErrorCode::MissingField
            | ErrorCode::InvalidRange
            | ErrorCode::InvalidFormat
            | ErrorCode::EmptyBrain => StatusCode::BAD_REQUEST,

            // Not found errors
            ErrorCode::BrainNotFound
            | ErrorCode::DocumentNotFound
            | ErrorCode::ConversationNotFound
            | ErrorCode::TemplateNotFound => StatusCode::NOT_FOUND,

            // Server errors
            ErrorCode::EngineUnavailable | ErrorCode::EngineTimeout => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// Returned by all endpoints when an error occurs. The wire shape is
/// `{error, detail?, request_id?}`; `code` drives the HTTP status and is
/// not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error (drives the HTTP status)
    #[serde(skip)]
    pub code: ErrorCode,

    /// Human-readable error message
    #[serde(rename = "error")]
    pub message: String,

    /// Optional additional detail (offending field or file, upstream cause)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Correlation id, set on server-side errors so logs can be matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
            request_id: None,
        }
    }

    /// Add additional detail to the error.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("Field '{}' must be between {} and {}", field, min, max),
        )
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    /// Create the EmptyBrain error returned when querying a brain with no
    /// documents. Message is part of the wire contract.
    pub fn empty_brain() -> Self {
        Self::new(ErrorCode::EmptyBrain, "Brain has no documents")
    }

    /// Create a BrainNotFound error.
    pub fn brain_not_found(brain_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::BrainNotFound,
            format!("Brain {} not found", brain_id),
        )
    }

    /// Create a DocumentNotFound error.
    pub fn document_not_found(name: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DocumentNotFound,
            format!("Document {} not found", name),
        )
    }

    /// Create a ConversationNotFound error.
    pub fn conversation_not_found(conversation_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConversationNotFound,
            format!("Conversation {} not found", conversation_id),
        )
    }

    /// Create a TemplateNotFound error.
    pub fn template_not_found(template_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::TemplateNotFound,
            format!("Template '{}' not found", template_id),
        )
    }

    /// Create an EngineUnavailable error with a fresh correlation id.
    pub fn engine_unavailable(detail: impl Into<String>) -> Self {
        Self::server_error(ErrorCode::EngineUnavailable, "Engine unavailable", detail)
    }

    /// Create an EngineTimeout error with a fresh correlation id.
    pub fn engine_timeout(seconds: u64) -> Self {
        Self::server_error(
            ErrorCode::EngineTimeout,
            "Engine unavailable",
            format!("engine call timed out after {}s", seconds),
        )
    }

    /// Create an InternalError with a fresh correlation id.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::server_error(ErrorCode::InternalError, "Internal server error", detail)
    }

    /// Server-side errors carry a request id and are logged with it so the
    /// response can be correlated with the log line.
    fn server_error(code: ErrorCode, message: &str, detail: impl Into<String>) -> Self {
        let request_id = uuid::Uuid::new_v4().to_string();
        let detail = detail.into();
        tracing::error!(code = %code, request_id = %request_id, detail = %detail, "request failed");
        Self {
            code,
            message: message.to_string(),
            detail: Some(detail),
            request_id: Some(request_id),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling
/// in Axum handlers:
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::brain_not_found(id))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM CORE ERRORS
// ============================================================================

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { kind, id } => match kind {
                EntityKind::Brain => ApiError::brain_not_found(id),
                EntityKind::Document => ApiError::document_not_found(id),
                EntityKind::Conversation | EntityKind::Message => {
                    ApiError::conversation_not_found(id)
                }
            },
            StorageError::InvalidName { name } => {
                ApiError::validation_failed(format!("Invalid filename: {}", name))
            }
            StorageError::Io { path, reason } => {
                ApiError::internal_error(format!("I/O error on {}: {}", path, reason))
            }
            other => ApiError::internal_error(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Timeout { seconds } => ApiError::engine_timeout(seconds),
            other => ApiError::engine_unavailable(other.to_string()),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
