//! Viewport and the stage/canvas coordinate mapper.
//!
//! Stage space is pixels relative to the visible container, as reported by
//! pointer events. Canvas space is the infinite plane all persisted geometry
//! lives in:
//!
//! ```text
//! canvas = (stage - offset) / scale
//! stage  = canvas * scale + offset
//! ```

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the visible canvas.
///
/// Owned and mutated by the view layer; the engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Stage-space position of the canvas origin.
    pub offset: Vec2,
    /// Stage pixels per canvas unit.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Viewport with the canvas origin at stage `offset`.
    pub fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Convert a stage point to canvas space.
    pub fn to_canvas(&self, stage: Point) -> Point {
        Point::new(
            (stage.x - self.offset.x) / self.scale,
            (stage.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a canvas point to stage space.
    pub fn to_stage(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.scale + self.offset.x,
            canvas.y * self.scale + self.offset.y,
        )
    }

    /// Convert a stage-space displacement to canvas units (no offset).
    pub fn delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Canvas-to-stage transform for rendering overlays.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Pan by a stage-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping `stage_point` fixed on screen.
    pub fn zoom_at(&mut self, stage_point: Point, factor: f64, min_scale: f64, max_scale: f64) {
        let new_scale = (self.scale * factor).clamp(min_scale, max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.to_canvas(stage_point);
        self.scale = new_scale;

        // Re-pin the anchor under the cursor
        let moved = self.to_stage(anchor);
        self.offset += stage_point - moved;
    }
}
