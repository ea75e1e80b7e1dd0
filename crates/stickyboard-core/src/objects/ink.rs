//! Freehand ink strokes (point clouds).

use super::{CanonicalGeometryUpdate, GeometryAdapter, point_to_polyline_dist};
use crate::bounds::Bounds;
use crate::config::EngineConfig;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke. Ink has no rotation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InkGeometry {
    pub points: Vec<Point>,
}

impl InkGeometry {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-axis scale factor; a flat axis cannot be stretched so it keeps scale 1.
fn axis_scale(new_extent: f64, old_extent: f64) -> f64 {
    if old_extent > f64::EPSILON {
        new_extent / old_extent
    } else {
        1.0
    }
}

impl GeometryAdapter for InkGeometry {
    fn bounds_view(&self) -> Bounds {
        Bounds::enclosing(&self.points).unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Affine map of every point from the current bounds onto `bounds`:
    /// `new = bounds.origin + (old - old_origin) * (bounds.size / old_size)`.
    fn from_bounds(&self, bounds: &Bounds, _min_size: f64) -> Self {
        let old = self.bounds_view();
        let sx = axis_scale(bounds.width, old.width);
        let sy = axis_scale(bounds.height, old.height);

        let points = self
            .points
            .iter()
            .map(|p| {
                Point::new(
                    bounds.left + (p.x - old.left) * sx,
                    bounds.top + (p.y - old.top) * sy,
                )
            })
            .collect();
        Self { points }
    }

    fn translate(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + delta).collect(),
        }
    }

    fn hit_test(&self, point: Point, tolerance: f64, _config: &EngineConfig) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance
    }

    fn to_update(&self) -> CanonicalGeometryUpdate {
        CanonicalGeometryUpdate::Ink {
            points: self.points.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}
