//! Object geometry adapters.
//!
//! Every object kind maps onto one of three native representations (a
//! rotatable box, a two-point connector, or a freehand point cloud). Each
//! representation implements [`GeometryAdapter`], which converts between the
//! generic [`Bounds`] view the resize/drag math works on and the native form
//! that gets persisted.

mod connector;
mod ink;
mod registry;
mod rotated_box;

pub use connector::ConnectorGeometry;
pub use ink::InkGeometry;
pub use registry::{AdapterFamily, AdapterRegistry};
pub use rotated_box::BoxGeometry;

use crate::bounds::Bounds;
use crate::config::EngineConfig;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for board objects.
pub type ObjectId = Uuid;

/// Kind tag carried by every board object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Rectangle,
    Ellipse,
    Diamond,
    Sticky,
    Text,
    Frame,
    Line,
    Arrow,
    Ink,
    /// A kind defined by the view layer; needs an explicit registration.
    Custom(String),
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Rectangle => f.write_str("rectangle"),
            ObjectKind::Ellipse => f.write_str("ellipse"),
            ObjectKind::Diamond => f.write_str("diamond"),
            ObjectKind::Sticky => f.write_str("sticky"),
            ObjectKind::Text => f.write_str("text"),
            ObjectKind::Frame => f.write_str("frame"),
            ObjectKind::Line => f.write_str("line"),
            ObjectKind::Arrow => f.write_str("arrow"),
            ObjectKind::Ink => f.write_str("ink"),
            ObjectKind::Custom(name) => f.write_str(name),
        }
    }
}

/// Opaque id plus kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

impl ObjectRef {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self { id, kind }
    }
}

/// An object as handed to the engine by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(flatten)]
    pub object: ObjectRef,
    pub geometry: ObjectGeometry,
    /// Per-object override of the minimum resize size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
}

impl SceneObject {
    /// Object with a fresh id.
    pub fn new(kind: ObjectKind, geometry: ObjectGeometry) -> Self {
        Self {
            object: ObjectRef::new(Uuid::new_v4(), kind),
            geometry,
            min_size: None,
        }
    }

    /// Object id.
    pub fn id(&self) -> ObjectId {
        self.object.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.object.kind
    }
}

/// Geometry emitted to the persistence layer when a gesture commits.
///
/// Serializes to exactly one of:
/// `{position, dimensions, rotation?}`, `{start, end}` or `{points}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalGeometryUpdate {
    Box {
        position: Point,
        dimensions: Size,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<f64>,
    },
    Connector {
        start: Point,
        end: Point,
    },
    Ink {
        points: Vec<[f64; 2]>,
    },
}

/// Translation between the generic bounds view and a native representation.
pub trait GeometryAdapter: Sized {
    /// Axis-aligned, pre-rotation bounds in canvas space.
    fn bounds_view(&self) -> Bounds;

    /// Rebuild the native geometry so its bounds view becomes `bounds`.
    fn from_bounds(&self, bounds: &Bounds, min_size: f64) -> Self;

    /// Floor the resize engine applies to moved extents of this geometry.
    fn resize_floor(&self, min_size: f64) -> f64 {
        min_size
    }

    /// Rigidly move the geometry.
    fn translate(&self, delta: Vec2) -> Self;

    /// Hit test a canvas point. `tolerance` is in canvas units.
    fn hit_test(&self, point: Point, tolerance: f64, config: &EngineConfig) -> bool;

    /// Persistable form.
    fn to_update(&self) -> CanonicalGeometryUpdate;

    /// Canvas position used by drag sessions (top-left of the bounds view).
    fn position(&self) -> Point {
        self.bounds_view().origin()
    }
}

/// Native geometry of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectGeometry {
    Box(BoxGeometry),
    Connector(ConnectorGeometry),
    Ink(InkGeometry),
}

impl ObjectGeometry {
    /// Representation name, for diagnostics.
    pub fn representation(&self) -> &'static str {
        match self {
            ObjectGeometry::Box(_) => "box",
            ObjectGeometry::Connector(_) => "connector",
            ObjectGeometry::Ink(_) => "ink",
        }
    }

    pub fn bounds_view(&self) -> Bounds {
        match self {
            ObjectGeometry::Box(g) => g.bounds_view(),
            ObjectGeometry::Connector(g) => g.bounds_view(),
            ObjectGeometry::Ink(g) => g.bounds_view(),
        }
    }

    pub fn from_bounds(&self, bounds: &Bounds, min_size: f64) -> Self {
        match self {
            ObjectGeometry::Box(g) => ObjectGeometry::Box(g.from_bounds(bounds, min_size)),
            ObjectGeometry::Connector(g) => {
                ObjectGeometry::Connector(g.from_bounds(bounds, min_size))
            }
            ObjectGeometry::Ink(g) => ObjectGeometry::Ink(g.from_bounds(bounds, min_size)),
        }
    }

    /// Floor for moved extents while resizing this geometry.
    pub fn resize_floor(&self, min_size: f64) -> f64 {
        match self {
            ObjectGeometry::Box(g) => g.resize_floor(min_size),
            ObjectGeometry::Connector(g) => g.resize_floor(min_size),
            ObjectGeometry::Ink(g) => g.resize_floor(min_size),
        }
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        match self {
            ObjectGeometry::Box(g) => ObjectGeometry::Box(g.translate(delta)),
            ObjectGeometry::Connector(g) => ObjectGeometry::Connector(g.translate(delta)),
            ObjectGeometry::Ink(g) => ObjectGeometry::Ink(g.translate(delta)),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64, config: &EngineConfig) -> bool {
        match self {
            ObjectGeometry::Box(g) => g.hit_test(point, tolerance, config),
            ObjectGeometry::Connector(g) => g.hit_test(point, tolerance, config),
            ObjectGeometry::Ink(g) => g.hit_test(point, tolerance, config),
        }
    }

    pub fn to_update(&self) -> CanonicalGeometryUpdate {
        match self {
            ObjectGeometry::Box(g) => g.to_update(),
            ObjectGeometry::Connector(g) => g.to_update(),
            ObjectGeometry::Ink(g) => g.to_update(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            ObjectGeometry::Box(g) => g.position(),
            ObjectGeometry::Connector(g) => g.position(),
            ObjectGeometry::Ink(g) => g.position(),
        }
    }

    /// Rotation in degrees (0 for kinds without rotation).
    pub fn rotation(&self) -> f64 {
        match self {
            ObjectGeometry::Box(g) => g.rotation,
            _ => 0.0,
        }
    }

    /// Box geometry, if this is one.
    pub fn as_box(&self) -> Option<&BoxGeometry> {
        match self {
            ObjectGeometry::Box(g) => Some(g),
            _ => None,
        }
    }

    /// Apply a canonical update, as the persistence layer would.
    ///
    /// Returns `None` when the update's shape does not match this geometry.
    pub fn apply_update(&self, update: &CanonicalGeometryUpdate) -> Option<Self> {
        match (self, update) {
            (
                ObjectGeometry::Box(g),
                CanonicalGeometryUpdate::Box {
                    position,
                    dimensions,
                    rotation,
                },
            ) => Some(ObjectGeometry::Box(BoxGeometry {
                position: *position,
                width: dimensions.width,
                height: dimensions.height,
                rotation: rotation.unwrap_or(g.rotation),
            })),
            (ObjectGeometry::Connector(_), CanonicalGeometryUpdate::Connector { start, end }) => {
                Some(ObjectGeometry::Connector(ConnectorGeometry::new(*start, *end)))
            }
            (ObjectGeometry::Ink(_), CanonicalGeometryUpdate::Ink { points }) => {
                Some(ObjectGeometry::Ink(InkGeometry::new(
                    points.iter().map(|[x, y]| Point::new(*x, *y)).collect(),
                )))
            }
            _ => None,
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => (point - *single).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}
