//! Anchor-aware resize from a frozen snapshot.
//!
//! Every frame is computed from the gesture-start snapshot and the pointer's
//! total displacement since gesture start. Nothing is accumulated frame to
//! frame, so the result depends only on where the pointer is now.

use crate::bounds::{Bounds, ResizeSnapshot};
use crate::rotate::{rotate_point, rotate_vector};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Resize handle driving a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge midpoint.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge midpoint.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge midpoint.
    Left,
}

/// Which edges of the bounds follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeMask {
    /// Left edge moves.
    pub left: bool,
    /// Top edge moves.
    pub top: bool,
    /// Right edge moves.
    pub right: bool,
    /// Bottom edge moves.
    pub bottom: bool,
}

impl EdgeMask {
    /// Whether the horizontal extent changes.
    pub fn moves_x(&self) -> bool {
        self.left || self.right
    }

    /// Whether the vertical extent changes.
    pub fn moves_y(&self) -> bool {
        self.top || self.bottom
    }
}

impl Anchor {
    /// Every handle, clockwise from top-left.
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Right,
        Anchor::BottomRight,
        Anchor::Bottom,
        Anchor::BottomLeft,
        Anchor::Left,
    ];

    /// Edges moved by this anchor. `None` behaves like bottom-right.
    pub fn edges(anchor: Option<Anchor>) -> EdgeMask {
        let anchor = anchor.unwrap_or(Anchor::BottomRight);
        EdgeMask {
            left: matches!(anchor, Anchor::TopLeft | Anchor::Left | Anchor::BottomLeft),
            top: matches!(anchor, Anchor::TopLeft | Anchor::Top | Anchor::TopRight),
            right: matches!(anchor, Anchor::TopRight | Anchor::Right | Anchor::BottomRight),
            bottom: matches!(anchor, Anchor::BottomLeft | Anchor::Bottom | Anchor::BottomRight),
        }
    }

    /// Edge-midpoint handles resize one axis only.
    pub fn is_edge_midpoint(&self) -> bool {
        matches!(self, Anchor::Top | Anchor::Right | Anchor::Bottom | Anchor::Left)
    }

    /// Unit position of this handle inside the bounds, (0,0) = top-left.
    pub fn unit_position(&self) -> (f64, f64) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::Top => (0.5, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::Right => (1.0, 0.5),
            Anchor::BottomRight => (1.0, 1.0),
            Anchor::Bottom => (0.5, 1.0),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::Left => (0.0, 0.5),
        }
    }

    /// Handle position on the given bounds (unrotated).
    pub fn position_on(&self, bounds: &Bounds) -> Point {
        let (u, v) = self.unit_position();
        Point::new(bounds.left + u * bounds.width, bounds.top + v * bounds.height)
    }
}

/// Point of the bounds that stays put while resizing with `anchor`.
pub fn fixed_point(bounds: &Bounds, anchor: Option<Anchor>) -> Point {
    let (u, v) = anchor.unwrap_or(Anchor::BottomRight).unit_position();
    Point::new(
        bounds.left + (1.0 - u) * bounds.width,
        bounds.top + (1.0 - v) * bounds.height,
    )
}

/// Recompute bounds from the snapshot and the pointer's total delta.
///
/// Moved edges are offset by `total_delta`. An extent whose edges move is
/// clamped to `min_size` by pinning the moving edge, never the fixed one; an
/// extent the anchor does not touch keeps the snapshot's size. With
/// `lock_aspect` and a corner (or default) anchor, one uniform scale is
/// applied and the fixed corner is kept in place.
pub fn compute_bounds(
    snapshot: &ResizeSnapshot,
    total_delta: Vec2,
    anchor: Option<Anchor>,
    lock_aspect: bool,
    min_size: f64,
) -> Bounds {
    let original = snapshot.bounds();
    let mask = Anchor::edges(anchor);

    let mut left = original.left;
    let mut top = original.top;
    let mut right = original.right();
    let mut bottom = original.bottom();

    if mask.left {
        left += total_delta.x;
    }
    if mask.right {
        right += total_delta.x;
    }
    if mask.top {
        top += total_delta.y;
    }
    if mask.bottom {
        bottom += total_delta.y;
    }

    if mask.moves_x() && right - left < min_size {
        if mask.left {
            left = right - min_size;
        } else {
            right = left + min_size;
        }
    }
    if mask.moves_y() && bottom - top < min_size {
        if mask.top {
            top = bottom - min_size;
        } else {
            bottom = top + min_size;
        }
    }

    let pure_edge = anchor.is_some_and(|a| a.is_edge_midpoint());
    let can_scale = original.width > f64::EPSILON && original.height > f64::EPSILON;
    if lock_aspect && !pure_edge && can_scale {
        let scale_x = (right - left) / original.width;
        let scale_y = (bottom - top) / original.height;
        let scale = scale_x
            .min(scale_y)
            .max(min_size / original.width)
            .max(min_size / original.height);

        let width = original.width * scale;
        let height = original.height * scale;

        if mask.left {
            left = right - width;
        } else {
            right = left + width;
        }
        if mask.top {
            top = bottom - height;
        } else {
            bottom = top + height;
        }
    }

    Bounds::from_edges(left, top, right, bottom)
}

/// Resize a box rotated by `rotation` degrees about its center.
///
/// The canvas-space delta is taken into the box's local frame, the local
/// bounds are computed as usual, and the result is shifted so the point
/// opposite the anchor stays where it was on the canvas.
pub fn compute_rotated_bounds(
    snapshot: &ResizeSnapshot,
    total_delta: Vec2,
    anchor: Option<Anchor>,
    lock_aspect: bool,
    min_size: f64,
    rotation: f64,
) -> Bounds {
    let local_delta = rotate_vector(total_delta, -rotation);
    let resized = compute_bounds(snapshot, local_delta, anchor, lock_aspect, min_size);
    if rotation == 0.0 {
        return resized;
    }

    let original = snapshot.bounds();
    let pinned_before = rotate_point(fixed_point(&original, anchor), original.center(), rotation);
    let pinned_after = rotate_point(fixed_point(&resized, anchor), resized.center(), rotation);
    resized.translate(pinned_before - pinned_after)
}

/// Resize driven by absolute pointer positions in canvas space.
///
/// Returns `None` when the snapshot or the gesture-start pointer is missing,
/// which happens for stale or cancelled gestures.
pub fn resize_from_pointer(
    snapshot: Option<&ResizeSnapshot>,
    start_pointer: Option<Point>,
    current_pointer: Point,
    anchor: Option<Anchor>,
    lock_aspect: bool,
    min_size: f64,
    rotation: f64,
) -> Option<Bounds> {
    let (Some(snapshot), Some(start)) = (snapshot, start_pointer) else {
        log::trace!("resize sample without snapshot or pointer origin ignored");
        return None;
    };
    Some(compute_rotated_bounds(
        snapshot,
        current_pointer - start,
        anchor,
        lock_aspect,
        min_size,
        rotation,
    ))
}
