//! Resolve a dialed path to the current menu position
//!
//! Pure function of the token sequence and the tree. No state survives
//! between requests; the gateway resends the whole path every time.

use super::menu::{MenuNode, MenuTree, NodeKind};
use super::path::TokenSequence;

/// Where a session stands after following every dialed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedState<'t> {
    /// Session just started, or the user asked to go back
    RootPrompt,
    /// A node reached by following every navigation token
    Node {
        node: &'t MenuNode,
        /// Free text typed after a chat gateway, joined with spaces
        query: Option<String>,
    },
    /// A token matched no option at its depth
    InvalidToken,
}

impl<'t> ResolvedState<'t> {
    fn at(node: &'t MenuNode) -> Self {
        if node.kind() == NodeKind::Back {
            ResolvedState::RootPrompt
        } else {
            ResolvedState::Node { node, query: None }
        }
    }
}

/// Walk the tree along `tokens`.
///
/// Stops at the first token with no matching child (`InvalidToken`), or at
/// the first chat gateway, which absorbs every remaining token as the query.
pub fn resolve<'t>(tree: &'t MenuTree, tokens: &TokenSequence) -> ResolvedState<'t> {
    if tokens.is_empty() {
        return ResolvedState::RootPrompt;
    }

    let tokens = tokens.as_slice();
    let mut node = tree.root();

    for (depth, token) in tokens.iter().enumerate() {
        if node.kind() == NodeKind::ChatGateway {
            return ResolvedState::Node {
                node,
                query: Some(tokens[depth..].join(" ")),
            };
        }

        match node.child(token) {
            Some(child) => node = child,
            None => return ResolvedState::InvalidToken,
        }
    }

    ResolvedState::at(node)
}
