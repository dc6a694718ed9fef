//! Shared event model and JSON codec for the peer-to-peer session wire.
//!
//! This crate owns the wire representation exchanged between participants.
//! Events form a closed tagged enum: the `type` field selects the variant,
//! chat and roll fields sit at the top level, and token events nest their
//! fields under `payload`. Unknown tags and malformed bodies fail decoding
//! so the dispatcher can drop them without touching session state.

use serde::{Deserialize, Serialize};
use tabletop::token::Token;

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes are not UTF-8 JSON matching any known event shape.
    #[error("failed to decode event: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single replicated message between session participants.
///
/// Events are immutable and transient: they are produced, broadcast, applied
/// and forgotten. There is no ordering, acknowledgement or redelivery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A chat line typed by a participant.
    #[serde(rename = "CHAT")]
    Chat { author: String, text: String },
    /// The outcome of a dice roll, pre-evaluated by the roller.
    #[serde(rename = "ROLL")]
    Roll { author: String, dice: String, total: i64, details: String },
    /// A token placed on the shared board.
    #[serde(rename = "TOKEN_ADD")]
    TokenAdd { payload: Token },
    /// A token repositioned on the shared board.
    #[serde(rename = "TOKEN_MOVE")]
    TokenMove { payload: TokenPosition },
}

/// Position payload of an [`Event::TokenMove`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Encode an event into wire bytes.
#[must_use]
pub fn encode_event(event: &Event) -> Vec<u8> {
    // Serializing a closed enum of strings and numbers cannot fail.
    serde_json::to_vec(event).unwrap_or_default()
}

/// Decode wire bytes into an event.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON, unknown `type` tags,
/// and bodies that do not match the tagged variant's shape.
pub fn decode_event(bytes: &[u8]) -> Result<Event, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
