//! Pointer input consumed by the manipulation engine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    /// Shift keeps the aspect ratio while resizing.
    pub fn aspect_lock(&self) -> bool {
        self.shift
    }

    /// Shift snaps the angle while rotating.
    pub fn snap_rotation(&self) -> bool {
        self.shift
    }
}

/// One pointer-move sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Absolute pointer position in stage space, if the event carried one.
    pub position: Option<Point>,
    /// Canvas position the view layer moved the dragged node to, if any.
    ///
    /// Only used as a fallback when the drag's pointer origin is missing.
    pub node_position: Option<Point>,
    pub modifiers: Modifiers,
}

impl PointerSample {
    /// A sample at a stage-space position with no modifiers held.
    pub fn at(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Same sample with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Same sample carrying the view-moved node position.
    pub fn with_node_position(mut self, node_position: Point) -> Self {
        self.node_position = Some(node_position);
        self
    }
}
