//! Scripted gesture replay.
//!
//! Plays the view layer for the manipulation engine: a JSON script describes
//! a scene, a selection and a sequence of pointer events, and every committed
//! gesture is applied back to the scene the way the persistence layer would.
//!
//! ## Script format
//!
//! ```json
//! {
//!   "viewport": { "offset": { "x": 0, "y": 0 }, "scale": 1 },
//!   "tool": "select",
//!   "objects": [ { "id": "…", "kind": "sticky", "geometry": { "type": "box", … } } ],
//!   "selection": [ "…" ],
//!   "events": [
//!     { "type": "down", "x": 150, "y": 150 },
//!     { "type": "move", "x": 180, "y": 160, "shift": true },
//!     { "type": "up" }
//!   ]
//! }
//! ```

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stickyboard_core::{
    AdapterRegistry, EngineConfig, GestureCommit, GestureContext, HandleKind, ManipulationError,
    Manipulator, Modifiers, ObjectId, PointerSample, SceneObject, ToolKind, Viewport,
};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Script error: {0}")]
    Json(String),
    #[error("Engine error: {0}")]
    Engine(#[from] ManipulationError),
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

fn default_can_edit() -> bool {
    true
}

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub tool: ToolKind,
    #[serde(default = "default_can_edit")]
    pub can_edit: bool,
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub selection: Vec<ObjectId>,
    pub events: Vec<Event>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        serde_json::from_str(json).map_err(|e| ReplayError::Json(e.to_string()))
    }
}

/// One input event, in stage coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Up,
    /// Escape or focus loss.
    Cancel,
    Pan { dx: f64, dy: f64 },
    Zoom { x: f64, y: f64, factor: f64 },
    Tool { tool: ToolKind },
}

fn modifiers(shift: bool) -> Modifiers {
    if shift { Modifiers::shift() } else { Modifiers::NONE }
}

/// Load a script from disk.
pub fn load_script(path: &Path) -> ReplayResult<Script> {
    let json = fs::read_to_string(path)
        .map_err(|e| ReplayError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Script::from_json(&json)
}

/// Run every event of a script and collect the committed gestures.
pub fn run_script(script: &Script) -> ReplayResult<Vec<GestureCommit>> {
    let mut replay = Replay::new(script)?;
    let mut commits = Vec::new();
    for event in &script.events {
        if let Some(commit) = replay.apply(event)? {
            commits.push(commit);
        }
    }
    Ok(commits)
}

/// Scene plus engine state while a script runs.
pub struct Replay {
    manipulator: Manipulator,
    ctx: GestureContext,
    objects: Vec<SceneObject>,
    selection: Vec<ObjectId>,
}

impl Replay {
    /// Set up the scene described by `script`.
    pub fn new(script: &Script) -> ReplayResult<Self> {
        script.config.validate()?;
        for id in &script.selection {
            if !script.objects.iter().any(|o| o.id() == *id) {
                return Err(ReplayError::UnknownObject(*id));
            }
        }

        Ok(Self {
            manipulator: Manipulator::new(script.config.clone(), AdapterRegistry::with_defaults()),
            ctx: GestureContext::new(script.viewport, script.tool, script.can_edit),
            objects: script.objects.clone(),
            selection: script.selection.clone(),
        })
    }

    /// Scene objects with every commit applied so far.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Current selection.
    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    /// Current pan and zoom.
    pub fn viewport(&self) -> &Viewport {
        &self.ctx.viewport
    }

    /// Feed one event. Returns the commit produced by a pointer-up, if any.
    pub fn apply(&mut self, event: &Event) -> ReplayResult<Option<GestureCommit>> {
        match event {
            Event::Down { x, y, .. } => {
                self.pointer_down(Point::new(*x, *y))?;
                Ok(None)
            }
            Event::Move { x, y, shift } => {
                let sample = PointerSample::at(Point::new(*x, *y)).with_modifiers(modifiers(*shift));
                self.manipulator.update_gesture(&self.ctx.viewport, &sample);
                Ok(None)
            }
            Event::Up => {
                let Some(commit) = self.manipulator.commit_gesture()? else {
                    return Ok(None);
                };
                self.store(&commit)?;
                Ok(Some(commit))
            }
            Event::Cancel => {
                self.manipulator.cancel_gesture();
                Ok(None)
            }
            Event::Pan { dx, dy } => {
                self.ctx.viewport.pan(Vec2::new(*dx, *dy));
                Ok(None)
            }
            Event::Zoom { x, y, factor } => {
                let config = self.manipulator.config();
                let (min, max) = (config.min_scale, config.max_scale);
                self.ctx.viewport.zoom_at(Point::new(*x, *y), *factor, min, max);
                Ok(None)
            }
            Event::Tool { tool } => {
                // Switching tools mid-gesture cancels it.
                if self.manipulator.cancel_gesture() {
                    log::debug!("Tool switch to {:?} cancelled the active gesture", tool);
                }
                self.ctx.tool = *tool;
                Ok(None)
            }
        }
    }

    fn selected_objects(&self) -> Vec<SceneObject> {
        self.objects
            .iter()
            .filter(|o| self.selection.contains(&o.id()))
            .cloned()
            .collect()
    }

    /// Handles of the topmost selected object win over object bodies.
    fn pointer_down(&mut self, stage: Point) -> ReplayResult<()> {
        let selected = self.selected_objects();

        if let Some(top) = selected.last() {
            match self.manipulator.handle_at(&self.ctx.viewport, top, stage) {
                Some(HandleKind::Resize(anchor)) => {
                    self.manipulator
                        .begin_resize(&self.ctx, top, &selected, Some(anchor), Some(stage));
                    return Ok(());
                }
                Some(HandleKind::Rotate) => {
                    self.manipulator.begin_rotate(&self.ctx, top, &selected)?;
                    return Ok(());
                }
                None => {}
            }
        }

        let Some(target) = self
            .objects
            .iter()
            .rev()
            .find(|o| self.manipulator.hit_test(&self.ctx.viewport, o, stage))
            .cloned()
        else {
            log::debug!("Pointer down on empty canvas at {:?}", stage);
            return Ok(());
        };

        if !self.selection.contains(&target.id()) {
            self.selection = vec![target.id()];
        }
        let selected = self.selected_objects();
        self.manipulator
            .begin_drag(&self.ctx, &target, &selected, Some(stage));
        Ok(())
    }

    /// Write a commit back into the scene.
    fn store(&mut self, commit: &GestureCommit) -> ReplayResult<()> {
        for update in &commit.updates {
            let object = self
                .objects
                .iter_mut()
                .find(|o| o.id() == update.id)
                .ok_or(ReplayError::UnknownObject(update.id))?;
            match object.geometry.apply_update(&update.geometry) {
                Some(geometry) => object.geometry = geometry,
                None => log::warn!("Update for {} does not match its geometry", update.id),
            }
        }
        Ok(())
    }
}
