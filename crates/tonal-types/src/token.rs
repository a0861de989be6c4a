// ABOUTME: Token assignment values and the per-mode token maps produced by a theme
// ABOUTME: A token resolves either to an index into the tonal ramp or to a literal color

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value assigned to a design token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Position in the tonal ramp.
    Index(u8),
    /// A literal color string, normally hex.
    Literal(String),
}

impl TokenValue {
    pub fn as_index(&self) -> Option<u8> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<u8> for TokenValue {
    fn from(index: u8) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for TokenValue {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Literal(literal) => f.write_str(literal),
        }
    }
}

/// Token name to value. Ordered so serialized output is stable.
pub type TokenMap = BTreeMap<String, TokenValue>;

/// Result of a theme computation; maps are present according to the requested mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<TokenMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<TokenMap>,
}
