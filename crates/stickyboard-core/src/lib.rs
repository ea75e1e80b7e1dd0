//! Stickyboard Core Library
//!
//! Object manipulation engine for the Stickyboard infinite canvas: coordinate
//! mapping, snapshot-based resize, rigid multi-object drag, rotation and the
//! per-kind geometry adapters that turn a finished gesture into canonical
//! geometry for the persistence layer.

pub mod bounds;
pub mod config;
pub mod drag;
pub mod error;
pub mod handles;
pub mod input;
pub mod manipulator;
pub mod objects;
pub mod resize;
pub mod rotate;
pub mod tools;
pub mod viewport;

pub use bounds::{Bounds, ResizeSnapshot};
pub use config::{EngineConfig, MIN_LINE_HIT, MIN_SIZE};
pub use drag::{DragSession, DragSessionState};
pub use error::{ManipulationError, ManipulationResult};
pub use handles::{Handle, HandleKind, handles_for, hit_test_handle};
pub use input::{Modifiers, PointerSample};
pub use manipulator::{GestureCommit, GestureContext, GesturePreview, Manipulator, ObjectUpdate};
pub use objects::{
    AdapterFamily, AdapterRegistry, BoxGeometry, CanonicalGeometryUpdate, ConnectorGeometry,
    GeometryAdapter, InkGeometry, ObjectGeometry, ObjectId, ObjectKind, ObjectRef, SceneObject,
};
pub use resize::{Anchor, compute_bounds, resize_from_pointer};
pub use tools::ToolKind;
pub use viewport::Viewport;
