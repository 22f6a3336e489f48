//! USSD menu navigation
//!
//! Reconstructs where a session stands from the dialed path alone, then
//! renders the CON/END response. Only the chat branch suspends, while the
//! answering service works on the question.

pub mod menu;
pub mod path;
pub mod render;
pub mod resolver;

#[cfg(test)]
mod proptests;

pub use menu::{MenuTree, NodeKind};
pub use path::TokenSequence;
pub use render::{render, Rendered, ResponseEnvelope};
pub use resolver::{resolve, ResolvedState};

use crate::ai_bridge::AiQueryBridge;
use std::sync::Arc;

/// Runs one dialed path through parse, resolve, render and, for chat
/// questions, the AI bridge
pub struct UssdEngine {
    tree: Arc<MenuTree>,
    bridge: Arc<AiQueryBridge>,
}

impl UssdEngine {
    pub fn new(tree: Arc<MenuTree>, bridge: Arc<AiQueryBridge>) -> Self {
        Self { tree, bridge }
    }

    #[allow(dead_code)] // API completeness
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Render the response for a dialed path without calling out.
    pub fn prepare(&self, dialed: &str) -> Rendered {
        let tokens = TokenSequence::parse(dialed);
        let state = resolve(&self.tree, &tokens);
        tracing::debug!(tokens = tokens.len(), state = state_name(&state), "Resolved dialed path");
        render(&state, &self.tree)
    }

    /// Produce the response envelope for a dialed path
    pub async fn respond(&self, dialed: &str) -> ResponseEnvelope {
        match self.prepare(dialed) {
            Rendered::Ready(envelope) => envelope,
            Rendered::Delegate { query } => {
                tracing::info!(query_len = query.len(), "Forwarding chat question");
                ResponseEnvelope::end(self.bridge.answer(&query).await)
            }
        }
    }
}

fn state_name(state: &ResolvedState<'_>) -> &'static str {
    match state {
        ResolvedState::RootPrompt => "root_prompt",
        ResolvedState::InvalidToken => "invalid_token",
        ResolvedState::Node { node, query } => match (node.kind(), query) {
            (NodeKind::ChatGateway, Some(_)) => "chat_query",
            (NodeKind::ChatGateway, None) => "chat_prompt",
            (NodeKind::Menu, _) => "menu",
            (NodeKind::LeafAction, _) => "leaf",
            (NodeKind::Back, _) => "back",
        },
    }
}
