//! Selection handles attached to a selected object.

use crate::bounds::Bounds;
use crate::objects::ObjectGeometry;
use crate::resize::Anchor;
use crate::rotate::rotate_point;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance from the top edge to the rotate handle, in canvas units.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// What dragging a handle does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Resize(Anchor),
    Rotate,
}

/// A handle with its canvas position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub position: Point,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// `tolerance` is in canvas units (stage tolerance divided by scale).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

const CORNERS: [Anchor; 4] = [
    Anchor::TopLeft,
    Anchor::TopRight,
    Anchor::BottomRight,
    Anchor::BottomLeft,
];

fn anchor_handles(bounds: &Bounds, rotation: f64, anchors: &[Anchor]) -> Vec<Handle> {
    let center = bounds.center();
    anchors
        .iter()
        .map(|anchor| {
            let position = rotate_point(anchor.position_on(bounds), center, rotation);
            Handle::new(HandleKind::Resize(*anchor), position)
        })
        .collect()
}

/// Handles for an object's geometry.
///
/// Boxes get all eight resize anchors plus a rotate handle. Connectors and
/// ink get the four bounds corners.
pub fn handles_for(geometry: &ObjectGeometry) -> Vec<Handle> {
    let bounds = geometry.bounds_view();
    match geometry {
        ObjectGeometry::Box(b) => {
            let mut handles = anchor_handles(&bounds, b.rotation, &Anchor::ALL);
            let top_center = Point::new(bounds.center().x, bounds.top - ROTATE_HANDLE_OFFSET);
            handles.push(Handle::new(
                HandleKind::Rotate,
                rotate_point(top_center, bounds.center(), b.rotation),
            ));
            handles
        }
        ObjectGeometry::Connector(_) | ObjectGeometry::Ink(_) => {
            anchor_handles(&bounds, 0.0, &CORNERS)
        }
    }
}

/// Find which handle (if any) is under a canvas point.
pub fn hit_test_handle(geometry: &ObjectGeometry, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles_for(geometry)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}
