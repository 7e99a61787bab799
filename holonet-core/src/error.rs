//! Error types for Holonet operations

use thiserror::Error;

/// Errors from the upstream catalog service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Record not found: {resource}/{id}")]
    NotFound { resource: String, id: String },

    #[error("Request for {resource} failed with status {status}: {message}")]
    RequestFailed {
        resource: String,
        status: u16,
        message: String,
    },

    #[error("Transport error talking to {resource}: {message}")]
    Transport { resource: String, message: String },

    #[error("Request for {resource} timed out")]
    Timeout { resource: String },

    #[error("Invalid response from {resource}: {reason}")]
    InvalidResponse { resource: String, reason: String },
}

/// Errors from the chat-completion service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat API key is missing or invalid for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Transport error talking to {provider}: {message}")]
    Transport { provider: String, message: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_not_found() {
        let err = UpstreamError::NotFound {
            resource: "people".to_string(),
            id: "42".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Record not found"));
        assert!(msg.contains("people/42"));
    }

    #[test]
    fn test_upstream_error_display_request_failed() {
        let err = UpstreamError::RequestFailed {
            resource: "planets".to_string(),
            status: 502,
            message: "bad gateway".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("planets"));
        assert!(msg.contains("502"));
        assert!(msg.contains("bad gateway"));
    }

    #[test]
    fn test_chat_error_display_rate_limited() {
        let err = ChatError::RateLimited {
            provider: "openai".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Rate limited"));
        assert!(msg.contains("openai"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "upstream_page_size".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("upstream_page_size"));
        assert!(msg.contains("must be positive"));
    }

}
