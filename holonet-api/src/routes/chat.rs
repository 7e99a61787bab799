//! Character chat route
//!
//! POST /characters/{id}/chat looks up the character, builds its persona
//! system turn, fits the conversation into the token budget, and forwards
//! the window to the chat provider. The caller resends the full visible
//! history each turn; the gateway holds no conversation state.

use axum::{
    extract::{Path, State},
    Json,
};
use holonet_core::{ChatTurn, Entity};
use holonet_llm::{build_window, character_persona, WindowBudget};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The new user message.
    pub message: String,

    /// The visible conversation so far, oldest first.
    #[serde(default)]
    pub previous_messages: Vec<ChatTurn>,
}

/// Chat response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /characters/{id}/chat - in-character completion.
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(ApiError::invalid_input("message must not be empty"));
    }

    let character = state.catalog.fetch_by_id(Entity::Characters, &id).await?;
    let persona = character_persona(&character);

    let budget = WindowBudget {
        max_tokens: state.config.chat_max_tokens,
        response_tokens: state.config.chat_response_tokens,
        buffer_tokens: state.config.chat_buffer_tokens,
    };
    let window = build_window(
        &request.previous_messages,
        ChatTurn::user(request.message),
        persona,
        budget.available(),
    );

    tracing::debug!(
        character_id = %id,
        window_turns = window.len(),
        "Requesting chat completion"
    );

    let response = state
        .chat
        .complete(&window, budget.response_tokens, state.config.chat_temperature)
        .await?;

    Ok(Json(ChatResponse { response }))
}
