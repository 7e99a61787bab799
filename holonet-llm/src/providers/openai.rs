//! OpenAI chat-completion provider

use crate::ChatProvider;
use async_trait::async_trait;
use holonet_core::{ChatError, ChatTurn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Chat provider backed by the OpenAI chat-completions API.
pub struct OpenAiChatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatProvider {
    /// Create a provider with the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ChatError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a provider for a specific model.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ChatError::Transport {
                provider: "openai".to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        })
    }

    /// Override the API base URL (for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: turns,
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            model = %self.model,
            turns = turns.len(),
            max_tokens,
            "Requesting chat completion"
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Transport {
                provider: "openai".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), "Chat completion request failed");

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => ChatError::RateLimited {
                    provider: "openai".to_string(),
                },
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChatError::InvalidApiKey {
                    provider: "openai".to_string(),
                },
                _ => ChatError::RequestFailed {
                    provider: "openai".to_string(),
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| ChatError::InvalidResponse {
                provider: "openai".to_string(),
                reason: format!("Failed to parse completion: {}", e),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::InvalidResponse {
                provider: "openai".to_string(),
                reason: "No completion in response".to_string(),
            })
    }
}

impl std::fmt::Debug for OpenAiChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
