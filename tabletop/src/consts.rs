//! Shared numeric constants for the tabletop crate.

// ── Tokens ──────────────────────────────────────────────────────

/// Token side length in world units (tokens are square).
pub const TOKEN_SIZE_WORLD: f64 = 40.0;

/// Offset from a spawn anchor to the token's top-left corner, so a freshly
/// placed token is centered on the anchor.
pub const TOKEN_CENTER_OFFSET: f64 = TOKEN_SIZE_WORLD / 2.0;

// ── View ────────────────────────────────────────────────────────

/// Multiplicative factor applied per zoom-in step (divided per zoom-out).
pub const ZOOM_STEP: f64 = 1.2;
