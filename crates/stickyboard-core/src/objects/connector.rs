//! Two-point connectors (lines and arrows).

use super::{CanonicalGeometryUpdate, GeometryAdapter, point_to_segment_dist};
use crate::bounds::Bounds;
use crate::config::EngineConfig;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A straight connector between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorGeometry {
    pub start: Point,
    pub end: Point,
}

impl ConnectorGeometry {
    /// Connector from `start` to `end`.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

/// -1, 0 or 1 for the direction of travel along one axis.
fn direction(from: f64, to: f64) -> f64 {
    if to > from {
        1.0
    } else if to < from {
        -1.0
    } else {
        0.0
    }
}

impl GeometryAdapter for ConnectorGeometry {
    fn bounds_view(&self) -> Bounds {
        Bounds::from_edges(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Stretch the connector over `bounds`, keeping which end sits on which
    /// side. An axis the connector never travelled along stays flat. If both
    /// extents end up shorter than `min_size`, a minimum-length segment is
    /// laid along the originally dominant axis.
    fn from_bounds(&self, bounds: &Bounds, min_size: f64) -> Self {
        let sign_x = direction(self.start.x, self.end.x);
        let sign_y = direction(self.start.y, self.end.y);

        let start_x = if sign_x < 0.0 { bounds.right() } else { bounds.left };
        let start_y = if sign_y < 0.0 { bounds.bottom() } else { bounds.top };
        let start = Point::new(start_x, start_y);
        let mut end = Point::new(
            start_x + sign_x * bounds.width,
            start_y + sign_y * bounds.height,
        );

        let extent = end - start;
        if extent.x.abs() < min_size && extent.y.abs() < min_size {
            let original = self.end - self.start;
            end = if original.x.abs() >= original.y.abs() {
                let sign = if sign_x == 0.0 { 1.0 } else { sign_x };
                Point::new(start.x + sign * min_size, start.y)
            } else {
                Point::new(start.x, start.y + sign_y * min_size)
            };
        }

        Self { start, end }
    }

    /// Extents may shrink to zero; `from_bounds` enforces the minimum length.
    fn resize_floor(&self, _min_size: f64) -> f64 {
        0.0
    }

    fn translate(&self, delta: Vec2) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Thin connectors are widened to `min_line_hit` for picking only.
    fn hit_test(&self, point: Point, tolerance: f64, config: &EngineConfig) -> bool {
        let reach = tolerance.max(config.min_line_hit / 2.0);
        point_to_segment_dist(point, self.start, self.end) <= reach
    }

    fn to_update(&self) -> CanonicalGeometryUpdate {
        CanonicalGeometryUpdate::Connector {
            start: self.start,
            end: self.end,
        }
    }
}
