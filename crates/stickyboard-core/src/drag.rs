//! Drag session coordinator.
//!
//! A drag moves either one object or, when the dragged object is part of a
//! larger selection, every selected object together. In both cases a single
//! delta is derived from the pointer's absolute canvas position and applied
//! to the positions captured at drag start, so members can never drift apart.

use crate::objects::ObjectId;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Gesture-scoped drag state: start positions plus the pointer origin.
///
/// Created at drag start and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSessionState {
    start_positions: HashMap<ObjectId, Point>,
    pointer_start: Option<Point>,
}

impl DragSessionState {
    /// Canvas position of `id` when the drag started.
    pub fn start_position(&self, id: ObjectId) -> Option<Point> {
        self.start_positions.get(&id).copied()
    }

    /// Pointer canvas position when the drag started.
    pub fn pointer_start(&self) -> Option<Point> {
        self.pointer_start
    }

    /// Every participant.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.start_positions.keys().copied()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.start_positions.len()
    }

    /// Whether the drag has no participants.
    pub fn is_empty(&self) -> bool {
        self.start_positions.is_empty()
    }
}

/// One active drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    dragged: ObjectId,
    state: DragSessionState,
    synchronized: bool,
    /// Delta of the last applied sample, relative to the start positions.
    delta: Vec2,
}

impl DragSession {
    /// Start a drag of `dragged`.
    ///
    /// `selection` holds the current canvas position of every selected
    /// object. If it has more than one member and contains `dragged`, the
    /// drag is synchronized across all of them; otherwise only `dragged`
    /// moves. `pointer_start` is the pointer's canvas position, if known.
    pub fn begin(
        dragged: ObjectId,
        dragged_position: Point,
        selection: &[(ObjectId, Point)],
        pointer_start: Option<Point>,
    ) -> Self {
        let synchronized =
            selection.len() > 1 && selection.iter().any(|(id, _)| *id == dragged);

        let mut start_positions = HashMap::new();
        if synchronized {
            start_positions.extend(selection.iter().copied());
        }
        start_positions.insert(dragged, dragged_position);

        Self {
            dragged,
            state: DragSessionState {
                start_positions,
                pointer_start,
            },
            synchronized,
            delta: Vec2::ZERO,
        }
    }

    /// Object under the pointer.
    pub fn dragged(&self) -> ObjectId {
        self.dragged
    }

    /// Start positions and pointer origin.
    pub fn state(&self) -> &DragSessionState {
        &self.state
    }

    /// Whether the whole selection moves together.
    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    /// Delta of the most recent applied sample.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Delta for a sample, without applying it.
    ///
    /// Pointer-anchored when the pointer origin was captured; otherwise
    /// derived from the dragged node's own displacement. `None` when
    /// neither is available.
    pub fn delta_for(&self, pointer: Option<Point>, node_position: Option<Point>) -> Option<Vec2> {
        if let (Some(start), Some(current)) = (self.state.pointer_start, pointer) {
            return Some(current - start);
        }
        let origin = self.state.start_position(self.dragged)?;
        node_position.map(|node| node - origin)
    }

    /// Apply a sample and return the broadcast positions.
    ///
    /// Returns `None` (and keeps the previous positions) when no delta can
    /// be computed for this frame.
    pub fn update(
        &mut self,
        pointer: Option<Point>,
        node_position: Option<Point>,
    ) -> Option<HashMap<ObjectId, Point>> {
        let Some(delta) = self.delta_for(pointer, node_position) else {
            log::debug!("drag of {} has no pointer origin or node position, frame skipped", self.dragged);
            return None;
        };
        self.delta = delta;
        Some(self.positions())
    }

    /// Current position of every participant: `start + delta`.
    pub fn positions(&self) -> HashMap<ObjectId, Point> {
        self.state
            .start_positions
            .iter()
            .map(|(id, start)| (*id, *start + self.delta))
            .collect()
    }
}
