//! Pointer input model: the gesture state machine driven by the board.
//!
//! A gesture starts at pointer-down, runs through any number of pointer
//! moves, and ends at pointer-up. Each active variant carries the context
//! captured at pointer-down so positions are computed from the gesture's
//! starting point instead of accumulating per-move deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::view::Point;

/// The active pointer gesture being tracked between pointer-down and
/// pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view by dragging empty map space.
    Panning {
        /// Pointer-down screen position minus the pan at that moment; the
        /// pan follows `screen - grab` on every move.
        grab: Point,
    },
    /// The user is dragging a token across the map.
    DraggingToken {
        /// Id of the token being dragged.
        id: String,
        /// Screen-space position of the pointer-down.
        start_screen: Point,
        /// Token x at the start of the drag.
        orig_x: f64,
        /// Token y at the start of the drag.
        orig_y: f64,
    },
}

impl DragState {
    /// Whether a gesture is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Emitted by [`crate::board::Board::pointer_up`] when a token drag ends,
/// carrying the token's final world position.
///
/// This is the only pointer gesture outcome that is replicated to other
/// participants; intermediate drag positions stay local.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenReleased {
    pub id: String,
    pub x: f64,
    pub y: f64,
}
