#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::ZOOM_STEP;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-participant view transform for the shared map.
///
/// `pan_x` / `pan_y` are in screen pixels. `scale` is a zoom factor
/// (1.0 = no zoom). The transform is never replicated: every participant
/// pans and zooms independently while token positions stay in world space.
#[derive(Debug, Clone, Copy)]
pub struct MapView {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, scale: 1.0 }
    }
}

impl MapView {
    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.scale,
            y: (screen.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.pan_x,
            y: world.y * self.scale + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        self.scale *= ZOOM_STEP;
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        self.scale /= ZOOM_STEP;
    }

    /// Restore the identity transform (scale 1, no pan).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
