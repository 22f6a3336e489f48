//! Protocol responses
//!
//! Rendering is pure: the one case that needs the AI service comes back as
//! a [`Rendered::Delegate`] for the caller to complete.

use super::menu::{MenuTree, NodeKind};
use super::resolver::ResolvedState;
use std::fmt;

pub const INVALID_INPUT: &str = "Invalid input. Please try again.";

/// Whether the handset should prompt again or close the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Continue,
    Terminate,
}

impl SessionAction {
    /// Wire prefix understood by the gateway
    pub fn prefix(self) -> &'static str {
        match self {
            SessionAction::Continue => "CON",
            SessionAction::Terminate => "END",
        }
    }
}

/// The only externally observable output of a USSD request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub action: SessionAction,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn proceed(body: impl Into<String>) -> Self {
        Self {
            action: SessionAction::Continue,
            body: body.into(),
        }
    }

    pub fn end(body: impl Into<String>) -> Self {
        Self {
            action: SessionAction::Terminate,
            body: body.into(),
        }
    }
}

impl fmt::Display for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.prefix(), self.body)
    }
}

/// Outcome of rendering a resolved state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Ready(ResponseEnvelope),
    /// Free-text query to answer; the answer ends the session
    Delegate { query: String },
}

/// Map a resolved state to a response
pub fn render(state: &ResolvedState<'_>, tree: &MenuTree) -> Rendered {
    let envelope = match state {
        ResolvedState::RootPrompt => ResponseEnvelope::proceed(tree.root().body()),
        ResolvedState::InvalidToken => ResponseEnvelope::end(INVALID_INPUT),
        ResolvedState::Node { node, query } => match (node.kind(), query) {
            (NodeKind::ChatGateway, Some(query)) => {
                return Rendered::Delegate {
                    query: query.clone(),
                }
            }
            (NodeKind::Menu | NodeKind::ChatGateway, _) => ResponseEnvelope::proceed(node.body()),
            (NodeKind::LeafAction, _) => ResponseEnvelope::end(node.body()),
            (NodeKind::Back, _) => ResponseEnvelope::proceed(tree.root().body()),
        },
    };
    Rendered::Ready(envelope)
}
