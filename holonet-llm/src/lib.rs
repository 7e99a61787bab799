//! Holonet LLM - Chat Completion Layer
//!
//! Provider-agnostic chat-completion trait, the token-budgeted context
//! window builder used before every completion call, and persona
//! construction from catalog records.

pub mod persona;
pub mod providers;
pub mod window;

pub use persona::character_persona;
pub use providers::openai::OpenAiChatProvider;
pub use window::{build_window, estimate_tokens, WindowBudget};

use async_trait::async_trait;
use holonet_core::{ChatError, ChatTurn};

/// A chat-completion service: ordered turns in, generated text out.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion over the given turns.
    ///
    /// `max_tokens` caps the response length; `temperature` controls
    /// sampling.
    async fn complete(
        &self,
        turns: &[ChatTurn],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ChatError>;
}

/// Mock chat provider for testing.
///
/// Records every call and answers with a deterministic echo of the last
/// user turn.
#[derive(Debug, Default)]
pub struct MockChatProvider {
    calls: std::sync::Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The turn sequences passed to each `complete` call so far.
    pub fn calls(&self) -> Vec<Vec<ChatTurn>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ChatError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(turns.to_vec());
        }
        let last_user = turns
            .iter()
            .rev()
            .find(|t| t.role == holonet_core::Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or("");
        Ok(format!("echo: {}", last_user))
    }
}
