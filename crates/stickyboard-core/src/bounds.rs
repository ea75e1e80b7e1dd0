//! Axis-aligned canvas-space bounds and the frozen resize snapshot.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned, pre-rotation rectangle in canvas space.
///
/// This is the canonical geometry unit every object kind can be viewed as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounds from origin and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from two edge pairs.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Smallest bounds containing every point. `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let rect = points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p));
        Some(rect.into())
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Midpoint.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Same size, shifted by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }

    /// As a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Immutable capture of an object's bounds at gesture start.
///
/// All resize math during a gesture is relative to this value. The inner
/// bounds are private so nothing can mutate a snapshot once taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSnapshot {
    bounds: Bounds,
}

impl ResizeSnapshot {
    /// Freeze `bounds` for the rest of the gesture.
    pub fn capture(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Captured bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!((b.right() - 110.0).abs() < f64::EPSILON);
        assert!((b.bottom() - 70.0).abs() < f64::EPSILON);
        assert_eq!(b.center(), Point::new(60.0, 45.0));
        assert_eq!(Bounds::from_edges(10.0, 20.0, 110.0, 70.0), b);
    }

    #[test]
    fn test_enclosing() {
        let b = Bounds::enclosing(&[
            Point::new(5.0, 50.0),
            Point::new(-5.0, 10.0),
            Point::new(20.0, 30.0),
        ])
        .unwrap();
        assert_eq!(b, Bounds::new(-5.0, 10.0, 25.0, 40.0));
        assert!(Bounds::enclosing(&[]).is_none());
    }

    #[test]
    fn test_from_flipped_rect() {
        let b: Bounds = Rect::new(100.0, 100.0, 50.0, 80.0).into();
        assert_eq!(b, Bounds::new(50.0, 80.0, 50.0, 20.0));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut live = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let snapshot = ResizeSnapshot::capture(live);
        live.width = 99.0;
        assert!((snapshot.bounds().width - 10.0).abs() < f64::EPSILON);
    }
}
