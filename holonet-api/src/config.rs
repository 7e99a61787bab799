//! Gateway configuration
//!
//! All process configuration lives in one explicit object loaded from
//! environment variables with development defaults, then passed to
//! component constructors. Nothing reads the environment after startup.

use holonet_core::ConfigError;
use std::time::Duration;

/// Configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    // ========================================================================
    // Upstream catalog
    // ========================================================================
    /// Base URL of the upstream catalog service.
    pub upstream_base_url: String,

    /// Fixed page size of upstream list responses.
    pub upstream_page_size: u32,

    /// Per-request timeout for upstream calls.
    pub upstream_timeout: Duration,

    // ========================================================================
    // Chat completion
    // ========================================================================
    /// OpenAI API key. Required only when the chat route is used.
    pub openai_api_key: Option<String>,

    /// Chat model identifier.
    pub chat_model: String,

    /// Model context size in tokens.
    pub chat_max_tokens: u32,

    /// Tokens reserved for the generated response.
    pub chat_response_tokens: u32,

    /// Safety margin for token estimation error.
    pub chat_buffer_tokens: u32,

    /// Sampling temperature for completions.
    pub chat_temperature: f32,

    // ========================================================================
    // HTTP server
    // ========================================================================
    /// Bind host for the HTTP server.
    pub bind_host: String,

    /// Bind port for the HTTP server.
    pub port: u16,

    /// Allowed CORS origins. Empty means allow all (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: "https://swapi.dev/api".to_string(),
            upstream_page_size: 10,
            upstream_timeout: Duration::from_secs(10),
            openai_api_key: None,
            chat_model: "gpt-4-turbo-preview".to_string(),
            chat_max_tokens: 4096,
            chat_response_tokens: 150,
            chat_buffer_tokens: 100,
            chat_temperature: 0.7,
            bind_host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOLONET_UPSTREAM_URL`: Upstream base URL (default: https://swapi.dev/api)
    /// - `HOLONET_UPSTREAM_PAGE_SIZE`: Upstream page size (default: 10)
    /// - `HOLONET_UPSTREAM_TIMEOUT_SECS`: Per-call timeout (default: 10)
    /// - `OPENAI_API_KEY`: Chat API key (chat route disabled without it)
    /// - `HOLONET_CHAT_MODEL`: Chat model (default: gpt-4-turbo-preview)
    /// - `HOLONET_CHAT_MAX_TOKENS`: Context size (default: 4096)
    /// - `HOLONET_CHAT_RESPONSE_TOKENS`: Response cap (default: 150)
    /// - `HOLONET_CHAT_BUFFER_TOKENS`: Estimation margin (default: 100)
    /// - `HOLONET_BIND`: Bind host (default: 0.0.0.0)
    /// - `PORT`: Bind port (default: 8000)
    /// - `HOLONET_CORS_ORIGINS`: Comma-separated origins (empty = allow all)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("HOLONET_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            upstream_base_url: std::env::var("HOLONET_UPSTREAM_URL")
                .unwrap_or(defaults.upstream_base_url),
            upstream_page_size: env_parse("HOLONET_UPSTREAM_PAGE_SIZE")
                .unwrap_or(defaults.upstream_page_size),
            upstream_timeout: env_parse("HOLONET_UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            chat_model: std::env::var("HOLONET_CHAT_MODEL").unwrap_or(defaults.chat_model),
            chat_max_tokens: env_parse("HOLONET_CHAT_MAX_TOKENS")
                .unwrap_or(defaults.chat_max_tokens),
            chat_response_tokens: env_parse("HOLONET_CHAT_RESPONSE_TOKENS")
                .unwrap_or(defaults.chat_response_tokens),
            chat_buffer_tokens: env_parse("HOLONET_CHAT_BUFFER_TOKENS")
                .unwrap_or(defaults.chat_buffer_tokens),
            chat_temperature: defaults.chat_temperature,
            bind_host: std::env::var("HOLONET_BIND").unwrap_or(defaults.bind_host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            cors_origins,
        }
    }

    /// Validate invariants the rest of the system relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream_base_url.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "upstream_base_url".to_string(),
            });
        }
        if self.upstream_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upstream_page_size".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.chat_max_tokens <= self.chat_response_tokens + self.chat_buffer_tokens {
            return Err(ConfigError::InvalidValue {
                field: "chat_max_tokens".to_string(),
                value: self.chat_max_tokens.to_string(),
                reason: "must exceed response + buffer reservation".to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
