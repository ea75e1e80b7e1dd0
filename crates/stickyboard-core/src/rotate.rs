//! Rotation math for rotate gestures and rotated boxes.
//!
//! Angles are in degrees, clockwise on screen (y grows downward).

use kurbo::{Affine, Point, Vec2};

/// Rotate `point` around `center` by `degrees`.
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    Affine::rotate_about(degrees.to_radians(), center) * point
}

/// Rotate a displacement by `degrees`.
pub fn rotate_vector(vector: Vec2, degrees: f64) -> Vec2 {
    if degrees == 0.0 {
        return vector;
    }
    Affine::rotate(degrees.to_radians()) * vector.to_point() - Point::ZERO
}

/// Normalise an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotation that points a box's top handle from `center` toward `pointer`.
///
/// 0° means the pointer is straight above the center. With `snap_degrees`
/// the result is rounded to the nearest increment.
pub fn rotation_toward(center: Point, pointer: Point, snap_degrees: Option<f64>) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let mut angle = dy.atan2(dx).to_degrees() + 90.0;

    if let Some(step) = snap_degrees.filter(|s| *s > 0.0) {
        angle = (angle / step).round() * step;
    }

    normalize_degrees(angle)
}
