//! Token model: the shared playing pieces and the store that owns them.
//!
//! Tokens live in world coordinates and are replicated verbatim between
//! participants; each participant renders them through its own view
//! transform. The store preserves insertion order so the most recently
//! added token sits on top for hit-testing, and it enforces id uniqueness:
//! adding a token whose id is already present is ignored rather than
//! overwriting, which makes replicated adds idempotent.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use serde::{Deserialize, Serialize};

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Player character.
    Pc,
    /// Enemy or other hostile piece.
    Enemy,
}

impl TokenKind {
    /// One-letter glyph shown on the token face.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Pc => 'P',
            Self::Enemy => 'E',
        }
    }
}

/// A token as stored on the board and carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier, `token-<millis>-<suffix>` when minted locally.
    pub id: String,
    /// Player character or enemy. Wire field name is `type`.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
}

/// In-memory store of tokens, in insertion order.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: Vec<Token>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token. Returns `false` without touching the store if a
    /// token with the same id is already present.
    pub fn insert(&mut self, token: Token) -> bool {
        if self.contains(&token.id) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    /// Reposition a token. Returns `false` if no token has this id.
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(token) = self.tokens.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        token.x = x;
        token.y = y;
        true
    }

    /// Return a reference to a token by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Whether a token with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }

    /// All tokens in insertion order (oldest first).
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the store contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
