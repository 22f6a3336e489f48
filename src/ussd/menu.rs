//! Static menu hierarchy
//!
//! The tree is declared once at startup, validated, and shared read-only
//! across all requests.

use super::path::SEPARATOR;
use std::collections::HashSet;
use thiserror::Error;

const ROOT_BODY: &str = "Welcome, MamaPesa\n1. Save for an asset\n2. Loans\n3. Chat with pesa AI\n4. Pay to till\n5. Deposit funds\n0. Exit";
const SAVE_BODY: &str = "Enter asset name:\n 0. Back\n";
const LOANS_BODY: &str = "1. Request loan\n2. Repay loan\n0. Back\n";
const CHAT_BODY: &str = "Please chat with pesa AI by asking any question:\n 0. Back\n";
const TILL_BODY: &str = "Enter till number:\n 0. Back\n";
const DEPOSIT_BODY: &str = "Enter amount:\n 0. Back\n";
const REQUEST_LOAN_BODY: &str = "Loan requests are not available yet.";
const REPAY_LOAN_BODY: &str = "Loan repayments are not available yet.";

/// Code of the edge that returns to the root menu
pub const BACK_CODE: &str = "0";

/// How a node behaves when the session reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Shows a prompt and expects another option token
    Menu,
    /// Ends the session with fixed text
    LeafAction,
    /// Treats every following token as free text for the AI service
    ChatGateway,
    /// Returns to the root prompt
    Back,
}

/// One point in the menu hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    code: String,
    title: String,
    body: String,
    kind: NodeKind,
    children: Vec<MenuNode>,
}

impl MenuNode {
    fn new(code: &str, title: &str, body: &str, kind: NodeKind) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            kind,
            children: vec![],
        }
    }

    pub fn menu(code: &str, title: &str, body: &str) -> Self {
        Self::new(code, title, body, NodeKind::Menu)
    }

    pub fn leaf(code: &str, title: &str, body: &str) -> Self {
        Self::new(code, title, body, NodeKind::LeafAction)
    }

    pub fn chat_gateway(code: &str, title: &str, body: &str) -> Self {
        Self::new(code, title, body, NodeKind::ChatGateway)
    }

    pub fn back(title: &str) -> Self {
        Self::new(BACK_CODE, title, "", NodeKind::Back)
    }

    /// Attach a child node
    pub fn with_child(mut self, child: MenuNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Label in the parent's listing. Parent bodies are written out by hand,
    /// so this is not what renders them.
    #[allow(dead_code)] // Titles are baked into the parent bodies
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[allow(dead_code)] // API completeness
    pub fn children(&self) -> &[MenuNode] {
        &self.children
    }

    /// Find the child whose option code equals `code`
    pub fn child(&self, code: &str) -> Option<&MenuNode> {
        self.children.iter().find(|c| c.code == code)
    }

    fn validate(&self, path: &str) -> Result<(), MenuError> {
        match self.kind {
            NodeKind::Menu if self.children.is_empty() => {
                return Err(MenuError::EmptyMenu {
                    path: path.to_string(),
                });
            }
            NodeKind::LeafAction | NodeKind::ChatGateway | NodeKind::Back
                if !self.children.is_empty() =>
            {
                return Err(MenuError::UnexpectedChildren {
                    path: path.to_string(),
                    kind: self.kind,
                });
            }
            _ => {}
        }

        let mut seen = HashSet::new();
        for child in &self.children {
            if child.code.is_empty() || child.code.contains(SEPARATOR) {
                return Err(MenuError::InvalidCode {
                    path: path.to_string(),
                    code: child.code.clone(),
                });
            }
            if !seen.insert(child.code.as_str()) {
                return Err(MenuError::DuplicateCode {
                    path: path.to_string(),
                    code: child.code.clone(),
                });
            }
            let child_path = if path.is_empty() {
                child.code.clone()
            } else {
                format!("{path}{SEPARATOR}{}", child.code)
            };
            child.validate(&child_path)?;
        }
        Ok(())
    }
}

/// Errors detected while building a menu tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Duplicate option code {code:?} under {path:?}")]
    DuplicateCode { path: String, code: String },
    #[error("Invalid option code {code:?} under {path:?}")]
    InvalidCode { path: String, code: String },
    #[error("Menu at {path:?} has no options")]
    EmptyMenu { path: String },
    #[error("{kind:?} node at {path:?} cannot have children")]
    UnexpectedChildren { path: String, kind: NodeKind },
}

/// Validated, immutable menu hierarchy
#[derive(Debug, Clone)]
pub struct MenuTree {
    root: MenuNode,
}

impl MenuTree {
    /// Validate and wrap a root node.
    ///
    /// The root must be a `Menu`; sibling codes must be unique and must not
    /// contain the path separator.
    pub fn new(root: MenuNode) -> Result<Self, MenuError> {
        if root.kind != NodeKind::Menu {
            return Err(MenuError::UnexpectedChildren {
                path: String::new(),
                kind: root.kind,
            });
        }
        root.validate("")?;
        Ok(Self { root })
    }

    /// The MamaPesa menu served by the gateway
    pub fn mamapesa() -> Result<Self, MenuError> {
        let root = MenuNode::menu("", "MamaPesa", ROOT_BODY)
            .with_child(
                MenuNode::menu("1", "Save for an asset", SAVE_BODY)
                    .with_child(MenuNode::back("Back")),
            )
            .with_child(
                MenuNode::menu("2", "Loans", LOANS_BODY)
                    .with_child(MenuNode::leaf("1", "Request loan", REQUEST_LOAN_BODY))
                    .with_child(MenuNode::leaf("2", "Repay loan", REPAY_LOAN_BODY))
                    .with_child(MenuNode::back("Back")),
            )
            .with_child(MenuNode::chat_gateway("3", "Chat with pesa AI", CHAT_BODY))
            .with_child(
                MenuNode::menu("4", "Pay to till", TILL_BODY)
                    .with_child(MenuNode::back("Back")),
            )
            .with_child(
                MenuNode::menu("5", "Deposit funds", DEPOSIT_BODY)
                    .with_child(MenuNode::back("Back")),
            )
            .with_child(MenuNode::back("Exit"));

        Self::new(root)
    }

    pub fn root(&self) -> &MenuNode {
        &self.root
    }
}
