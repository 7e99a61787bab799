//! Token-budgeted context window builder
//!
//! Chat histories are unbounded but the completion model's context is not.
//! Before every completion the window builder reserves the persona turn,
//! then walks the history (plus the new user message) from newest to oldest
//! and keeps the longest contiguous suffix that fits the remaining budget.

use holonet_core::ChatTurn;

/// Token budget for one completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBudget {
    /// Model context size in tokens.
    pub max_tokens: u32,
    /// Tokens reserved for the generated response.
    pub response_tokens: u32,
    /// Safety margin for estimation error.
    pub buffer_tokens: u32,
}

impl Default for WindowBudget {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            response_tokens: 150,
            buffer_tokens: 100,
        }
    }
}

impl WindowBudget {
    /// Tokens available for the persona plus history.
    pub fn available(&self) -> u32 {
        self.max_tokens
            .saturating_sub(self.response_tokens)
            .saturating_sub(self.buffer_tokens)
    }
}

/// Estimate the token cost of a text.
///
/// ceil(len / 4) is a coarse character-based proxy, not a tokenizer. It is
/// kept for behavioral parity with the upstream service this gateway
/// replaces; swapping in a real tokenizer behind this function would not
/// change the window contract.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.len() as u32).div_ceil(4)
}

/// Select the turns to send for one completion.
///
/// The persona is always included and its cost is subtracted from the
/// budget up front, never traded against history. History plus the new
/// user message are walked newest to oldest and included greedily until
/// the first turn that would overflow; older turns are never skipped to
/// fit shorter ones. The output is `[persona]` followed by the selected
/// suffix in original oldest-to-newest order.
pub fn build_window(
    history: &[ChatTurn],
    new_user_message: ChatTurn,
    persona: ChatTurn,
    budget: u32,
) -> Vec<ChatTurn> {
    let persona_cost = estimate_tokens(&persona.content);
    let history_budget = budget.saturating_sub(persona_cost);

    let mut selected: Vec<ChatTurn> = Vec::new();
    let mut used: u32 = 0;

    let candidates = history.iter().cloned().chain(std::iter::once(new_user_message));
    for turn in candidates.rev() {
        let cost = estimate_tokens(&turn.content);
        if used + cost > history_budget {
            break;
        }
        used += cost;
        selected.push(turn);
    }
    selected.reverse();

    let mut window = Vec::with_capacity(selected.len() + 1);
    window.push(persona);
    window.extend(selected);
    window
}
