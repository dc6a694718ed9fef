use crate::consts::TOKEN_CENTER_OFFSET;
use crate::hit;
use crate::input::{DragState, TokenReleased};
use crate::map::MapImage;
use crate::token::{Token, TokenStore};
use crate::view::{MapView, Point};

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

/// Board state for one participant: tokens, view transform, the active
/// pointer gesture, and the uploaded map background.
///
/// Tokens are shared state and converge across participants; the view,
/// the gesture and the map stay local. The board never talks to a
/// transport: replicated inputs arrive through the `apply_*` methods and
/// local gestures report what should be replicated through their return
/// values.
pub struct Board {
    pub tokens: TokenStore,
    pub view: MapView,
    pub drag: DragState,
    pub map: Option<MapImage>,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            tokens: TokenStore::new(),
            view: MapView::default(),
            drag: DragState::Idle,
            map: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the viewport dimensions used for center spawning.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // --- Replicated inputs ---

    /// Apply a token add, local or remote. Returns `false` when the id is
    /// already taken and the add was ignored.
    pub fn apply_add(&mut self, token: Token) -> bool {
        self.tokens.insert(token)
    }

    /// Apply a token move, local or remote. Missing ids are a no-op.
    pub fn apply_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.tokens.move_to(id, x, y)
    }

    // --- Local placement ---

    /// World position for a token spawned without an explicit position:
    /// the viewport center, inverse-transformed through the current view,
    /// offset so the token is centered rather than cornered there.
    #[must_use]
    pub fn spawn_point(&self) -> Point {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        let world = self.view.screen_to_world(center);
        Point::new(world.x - TOKEN_CENTER_OFFSET, world.y - TOKEN_CENTER_OFFSET)
    }

    // --- Pointer gestures ---

    /// Start a gesture: dragging the token under the pointer if there is
    /// one, otherwise panning the view.
    pub fn pointer_down(&mut self, screen: Point) {
        let world = self.view.screen_to_world(screen);
        if let Some(token) = hit::token_at(&self.tokens, world) {
            self.drag = DragState::DraggingToken {
                id: token.id.clone(),
                start_screen: screen,
                orig_x: token.x,
                orig_y: token.y,
            };
        } else {
            self.drag = DragState::Panning {
                grab: Point::new(screen.x - self.view.pan_x, screen.y - self.view.pan_y),
            };
        }
    }

    /// Advance the active gesture. Panning updates the view; dragging
    /// repositions the token locally. Nothing is replicated here.
    pub fn pointer_move(&mut self, screen: Point) {
        match &self.drag {
            DragState::Idle => {}
            DragState::Panning { grab } => {
                self.view.pan_x = screen.x - grab.x;
                self.view.pan_y = screen.y - grab.y;
            }
            DragState::DraggingToken { id, start_screen, orig_x, orig_y } => {
                let dx = self.view.screen_dist_to_world(screen.x - start_screen.x);
                let dy = self.view.screen_dist_to_world(screen.y - start_screen.y);
                self.tokens.move_to(id, orig_x + dx, orig_y + dy);
            }
        }
    }

    /// End the active gesture. A token drag reports the token's final
    /// position for replication; releasing a pan reports nothing.
    pub fn pointer_up(&mut self) -> Option<TokenReleased> {
        match std::mem::take(&mut self.drag) {
            DragState::DraggingToken { id, .. } => {
                let token = self.tokens.get(&id)?;
                Some(TokenReleased { id, x: token.x, y: token.y })
            }
            DragState::Idle | DragState::Panning { .. } => None,
        }
    }

    // --- View controls ---

    /// Zoom in by one step around the pan origin.
    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    /// Zoom out by one step around the pan origin.
    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    /// Restore the identity view transform.
    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Install a new map background and reset the view transform so the
    /// fresh map starts unpanned and unzoomed.
    pub fn set_map(&mut self, image: MapImage) {
        self.map = Some(image);
        self.view.reset();
    }

    // --- Queries ---

    /// Look up a token by id.
    #[must_use]
    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }
}
