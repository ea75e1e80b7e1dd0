//! Center-anchored rotatable box (rectangles, stickies, frames, most closed shapes).

use super::{CanonicalGeometryUpdate, GeometryAdapter};
use crate::bounds::Bounds;
use crate::config::EngineConfig;
use crate::rotate::rotate_point;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// A box described by its unrotated top-left, size, and a rotation about its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// Top-left corner before rotation.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
}

impl BoxGeometry {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn center(&self) -> Point {
        self.bounds_view().center()
    }

    /// Corners in canvas space after rotation: TL, TR, BR, BL.
    pub fn corners(&self) -> [Point; 4] {
        let b = self.bounds_view();
        let center = b.center();
        [
            Point::new(b.left, b.top),
            Point::new(b.right(), b.top),
            Point::new(b.right(), b.bottom()),
            Point::new(b.left, b.bottom()),
        ]
        .map(|p| rotate_point(p, center, self.rotation))
    }
}

impl GeometryAdapter for BoxGeometry {
    fn bounds_view(&self) -> Bounds {
        Bounds::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// The new bounds replace position and size; rotation is kept and
    /// re-applied around the new center, so scaling never skews the box.
    fn from_bounds(&self, bounds: &Bounds, _min_size: f64) -> Self {
        Self {
            position: bounds.origin(),
            width: bounds.width,
            height: bounds.height,
            rotation: self.rotation,
        }
    }

    fn translate(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..self.clone()
        }
    }

    fn hit_test(&self, point: Point, tolerance: f64, _config: &EngineConfig) -> bool {
        // Undo the rotation and test against the axis-aligned box
        let local = rotate_point(point, self.center(), -self.rotation);
        self.bounds_view()
            .to_rect()
            .inflate(tolerance, tolerance)
            .contains(local)
    }

    fn to_update(&self) -> CanonicalGeometryUpdate {
        CanonicalGeometryUpdate::Box {
            position: self.position,
            dimensions: Size::new(self.width, self.height),
            rotation: Some(self.rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_keeps_rotation() {
        let original = BoxGeometry::new(Point::new(0.0, 0.0), 100.0, 50.0).with_rotation(30.0);
        let resized = original.from_bounds(&Bounds::new(10.0, 20.0, 200.0, 80.0), 20.0);
        assert_eq!(resized.position, Point::new(10.0, 20.0));
        assert!((resized.width - 200.0).abs() < f64::EPSILON);
        assert!((resized.height - 80.0).abs() < f64::EPSILON);
        assert!((resized.rotation - 30.0).abs() < f64::EPSILON);
        assert_eq!(resized.center(), Point::new(110.0, 60.0));
    }

    #[test]
    fn test_corners_rotate_about_center() {
        let square = BoxGeometry::new(Point::new(-10.0, -10.0), 20.0, 20.0).with_rotation(90.0);
        let [tl, tr, _, _] = square.corners();
        // A quarter turn clockwise takes top-left to top-right.
        assert!((tl.x - 10.0).abs() < 1e-9);
        assert!((tl.y + 10.0).abs() < 1e-9);
        assert!((tr.x - 10.0).abs() < 1e-9);
        assert!((tr.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_rotated() {
        let config = EngineConfig::default();
        let bar = BoxGeometry::new(Point::new(-50.0, -5.0), 100.0, 10.0);
        assert!(bar.hit_test(Point::new(40.0, 0.0), 0.0, &config));
        assert!(!bar.hit_test(Point::new(0.0, 40.0), 0.0, &config));

        let upright = bar.clone().with_rotation(90.0);
        assert!(!upright.hit_test(Point::new(40.0, 0.0), 0.0, &config));
        assert!(upright.hit_test(Point::new(0.0, 40.0), 0.0, &config));
    }

    #[test]
    fn test_translate() {
        let b = BoxGeometry::new(Point::new(1.0, 2.0), 3.0, 4.0).with_rotation(10.0);
        let moved = b.translate(Vec2::new(10.0, -2.0));
        assert_eq!(moved.position, Point::new(11.0, 0.0));
        assert!((moved.rotation - 10.0).abs() < f64::EPSILON);
    }
}
