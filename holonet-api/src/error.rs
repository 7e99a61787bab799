//! Error types for the Holonet API layer
//!
//! Structured error responses with stable error codes, serialized as JSON
//! with the matching HTTP status. Aggregation-loop failures never reach
//! this type; they degrade to partial results inside the engine.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use holonet_core::{ChatError, UpstreamError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data (non-numeric page/limit, ...)
    InvalidInput,

    /// Requested record does not exist upstream
    EntityNotFound,

    /// The upstream catalog service failed or returned garbage
    UpstreamUnavailable,

    /// The chat-completion service failed or returned garbage
    ChatUnavailable,

    /// The chat-completion service rate limited us
    RateLimited,

    /// An upstream call timed out
    Timeout,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::EntityNotFound => StatusCode::NOT_FOUND,
            ErrorCode::UpstreamUnavailable | ErrorCode::ChatUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
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
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an EntityNotFound error.
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EntityNotFound,
            format!("{} with id {} not found", entity, id),
        )
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Implement IntoResponse so handlers can return `Result<_, ApiError>`.
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

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound { resource, id } => ApiError::new(
                ErrorCode::EntityNotFound,
                format!("{} with id {} not found", resource, id),
            ),
            UpstreamError::Timeout { resource } => ApiError::new(
                ErrorCode::Timeout,
                format!("Upstream request for {} timed out", resource),
            ),
            other => {
                tracing::error!(error = %other, "Upstream call failed");
                ApiError::new(ErrorCode::UpstreamUnavailable, "Upstream catalog unavailable")
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::RateLimited { .. } => ApiError::new(
                ErrorCode::RateLimited,
                "Chat service rate limit exceeded, try again later",
            ),
            other => {
                tracing::error!(error = %other, "Chat completion failed");
                ApiError::new(ErrorCode::ChatUnavailable, "Chat service unavailable")
            }
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
