//! Board tools, as far as the manipulation engine cares about them.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Rectangle,
    Ellipse,
    Sticky,
    Frame,
    Line,
    Arrow,
    Freehand,
    Text,
    Eraser,
}

impl ToolKind {
    /// Whether pointer-down on an object may start a drag, resize or rotate.
    pub fn allows_direct_manipulation(&self) -> bool {
        matches!(self, ToolKind::Select)
    }
}
