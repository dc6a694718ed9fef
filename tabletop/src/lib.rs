//! Pure board engine for the virtual tabletop.
//!
//! This crate owns everything a participant sees on the map tab: the shared
//! tokens, the per-participant pan/zoom view, the pointer gesture machine
//! that turns raw pointer events into pan and drag mutations, and the
//! uploaded map background. It is deliberately free of I/O, randomness and
//! async: identifiers and timestamps are supplied by the caller, and the
//! session layer decides what to replicate to other participants.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Top-level board state and the pointer entry points |
//! | [`token`] | Token types and the insertion-ordered token store |
//! | [`view`] | Pan/zoom view transform and coordinate conversions |
//! | [`input`] | Pointer gesture state machine types |
//! | [`hit`] | Hit-testing pointer positions against tokens |
//! | [`map`] | Uploaded map background as a base64 data URI |
//! | [`consts`] | Shared numeric constants (token size, zoom step) |

pub mod board;
pub mod consts;
pub mod hit;
pub mod input;
pub mod map;
pub mod token;
pub mod view;
