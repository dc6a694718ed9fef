#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::TOKEN_SIZE_WORLD;
use crate::token::{Token, TokenStore};
use crate::view::Point;

/// Whether `world` falls inside the token's axis-aligned box.
///
/// Boxes are half-open: a point exactly on the right or bottom edge misses.
#[must_use]
pub fn token_contains(token: &Token, world: Point) -> bool {
    world.x >= token.x
        && world.x < token.x + TOKEN_SIZE_WORLD
        && world.y >= token.y
        && world.y < token.y + TOKEN_SIZE_WORLD
}

/// Find the token under `world`, if any.
///
/// When tokens overlap the most recently added one wins, matching the
/// stacking order of insertion.
#[must_use]
pub fn token_at(store: &TokenStore, world: Point) -> Option<&Token> {
    store.iter().rev().find(|t| token_contains(t, world))
}
