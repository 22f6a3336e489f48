//! Dialed path parsing
//!
//! The gateway resends the whole navigation history on every callback,
//! joined with `*`. Splitting it back into tokens is the first step of
//! every request.

/// Separator between inputs in a dialed path
pub const SEPARATOR: char = '*';

/// Ordered inputs the user has dialed so far in this session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    /// Split a raw dialed path into tokens.
    ///
    /// An empty path means the session just started and yields no tokens.
    /// Anything else is split verbatim, so `"3*"` yields `["3", ""]`.
    pub fn parse(dialed: &str) -> Self {
        if dialed.is_empty() {
            return Self::default();
        }
        Self {
            tokens: dialed.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Re-join the tokens into the dialed path they came from
    #[allow(dead_code)] // Inverse of parse, used by property tests
    pub fn to_dialed(&self) -> String {
        self.tokens.join(&SEPARATOR.to_string())
    }
}
