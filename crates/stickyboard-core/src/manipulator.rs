//! Gesture facade used by the view layer and the persistence layer.
//!
//! A [`Manipulator`] owns at most one active gesture. View code starts it
//! with one of the `begin_*` calls, feeds pointer samples through
//! [`Manipulator::update_gesture`] and ends it with either
//! [`Manipulator::commit_gesture`] or [`Manipulator::cancel_gesture`].

use crate::bounds::{Bounds, ResizeSnapshot};
use crate::config::EngineConfig;
use crate::drag::DragSession;
use crate::error::{ManipulationError, ManipulationResult};
use crate::handles::{HandleKind, hit_test_handle};
use crate::input::PointerSample;
use crate::objects::{
    AdapterRegistry, CanonicalGeometryUpdate, GeometryAdapter, ObjectId, SceneObject,
};
use crate::resize::{Anchor, resize_from_pointer};
use crate::rotate::rotation_toward;
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::mem;

/// View-layer state read when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureContext {
    /// Stage-to-canvas mapping at gesture start.
    pub viewport: Viewport,
    /// Active tool.
    pub tool: ToolKind,
    /// Whether the current user may edit the board.
    pub can_edit: bool,
}

impl GestureContext {
    /// Context for a gesture under `tool` through `viewport`.
    pub fn new(viewport: Viewport, tool: ToolKind, can_edit: bool) -> Self {
        Self {
            viewport,
            tool,
            can_edit,
        }
    }
}

/// Live feedback for one pointer sample. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum GesturePreview {
    /// Canvas position of every dragged object.
    Positions(HashMap<ObjectId, Point>),
    /// New pre-rotation bounds of the resized object.
    Bounds { id: ObjectId, bounds: Bounds },
    /// New rotation of the rotated object, in degrees.
    Rotation { id: ObjectId, degrees: f64 },
}

/// Canonical geometry for one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    /// Updated object.
    pub id: ObjectId,
    /// Its new persisted geometry.
    pub geometry: CanonicalGeometryUpdate,
}

/// Everything a committed gesture hands to the persistence layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureCommit {
    /// One entry per moved, resized or rotated object.
    pub updates: Vec<ObjectUpdate>,
    /// Frames whose contents must be re-laid out by the containment owner.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relayout: Vec<ObjectId>,
}

#[derive(Debug, Clone)]
struct ResizeGesture {
    target: SceneObject,
    snapshot: ResizeSnapshot,
    pointer_start: Option<Point>,
    anchor: Option<Anchor>,
    /// Applied to moved extents while the pointer moves.
    floor: f64,
    /// Handed to the adapter on commit.
    min_size: f64,
    last: Bounds,
}

#[derive(Debug, Clone)]
struct RotateGesture {
    target: SceneObject,
    center: Point,
    rotation: f64,
}

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    Drag {
        session: DragSession,
        participants: Vec<SceneObject>,
    },
    Resize(ResizeGesture),
    Rotate(RotateGesture),
}

impl Gesture {
    fn target(&self) -> Option<ObjectId> {
        match self {
            Gesture::Idle => None,
            Gesture::Drag { session, .. } => Some(session.dragged()),
            Gesture::Resize(resize) => Some(resize.target.id()),
            Gesture::Rotate(rotate) => Some(rotate.target.id()),
        }
    }
}

/// Drag, resize and rotate state machine for one view.
#[derive(Debug, Clone)]
pub struct Manipulator {
    config: EngineConfig,
    registry: AdapterRegistry,
    gesture: Gesture,
}

impl Default for Manipulator {
    fn default() -> Self {
        Self::new(EngineConfig::default(), AdapterRegistry::with_defaults())
    }
}

impl Manipulator {
    /// Idle manipulator using `config` and `registry`.
    pub fn new(config: EngineConfig, registry: AdapterRegistry) -> Self {
        Self {
            config,
            registry,
            gesture: Gesture::Idle,
        }
    }

    /// Engine tunables.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Kind-to-adapter mapping.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Object driving the active gesture.
    pub fn active_target(&self) -> Option<ObjectId> {
        self.gesture.target()
    }

    /// Start dragging `target`.
    ///
    /// `pointer` is the stage position of the pointer-down, if the event had
    /// one. When `target` is one of several selected objects the whole
    /// selection moves with it. Returns `false` when the gesture is not
    /// permitted.
    pub fn begin_drag(
        &mut self,
        ctx: &GestureContext,
        target: &SceneObject,
        selection: &[SceneObject],
        pointer: Option<Point>,
    ) -> bool {
        if !self.permits(ctx, target, selection) {
            return false;
        }

        let positions: Vec<(ObjectId, Point)> = selection
            .iter()
            .map(|object| (object.id(), object.geometry.position()))
            .collect();
        let pointer_start = pointer.map(|p| ctx.viewport.to_canvas(p));
        let session = DragSession::begin(
            target.id(),
            target.geometry.position(),
            &positions,
            pointer_start,
        );
        let participants = if session.is_synchronized() {
            selection.to_vec()
        } else {
            vec![target.clone()]
        };

        log::debug!(
            "drag of {} started with {} participant(s)",
            target.id(),
            session.state().len()
        );
        self.replace_gesture(Gesture::Drag {
            session,
            participants,
        });
        true
    }

    /// Start resizing `target` from `anchor` (`None` for a free resize).
    pub fn begin_resize(
        &mut self,
        ctx: &GestureContext,
        target: &SceneObject,
        selection: &[SceneObject],
        anchor: Option<Anchor>,
        pointer: Option<Point>,
    ) -> bool {
        if !self.permits(ctx, target, selection) {
            return false;
        }

        let bounds = target.geometry.bounds_view();
        let min_size = self.config.min_size_for(target.min_size);
        let resize = ResizeGesture {
            target: target.clone(),
            snapshot: ResizeSnapshot::capture(bounds),
            pointer_start: pointer.map(|p| ctx.viewport.to_canvas(p)),
            anchor,
            floor: target.geometry.resize_floor(min_size),
            min_size,
            last: bounds,
        };

        log::debug!("resize of {} started from {:?}", target.id(), anchor);
        self.replace_gesture(Gesture::Resize(resize));
        true
    }

    /// Start rotating `target` around its center.
    ///
    /// Fails for kinds whose adapter cannot rotate or that have no adapter.
    pub fn begin_rotate(
        &mut self,
        ctx: &GestureContext,
        target: &SceneObject,
        selection: &[SceneObject],
    ) -> ManipulationResult<bool> {
        let family = self.registry.resolve(target.kind(), &target.geometry)?;
        if !family.supports_rotation() {
            return Err(ManipulationError::RotationUnsupported {
                kind: target.kind().clone(),
            });
        }
        if !self.permits(ctx, target, selection) {
            return Ok(false);
        }

        let rotate = RotateGesture {
            target: target.clone(),
            center: target.geometry.bounds_view().center(),
            rotation: target.geometry.rotation(),
        };

        log::debug!("rotate of {} started", target.id());
        self.replace_gesture(Gesture::Rotate(rotate));
        Ok(true)
    }

    /// Apply one pointer sample to the active gesture.
    ///
    /// The stage position is converted to canvas space once here. Returns
    /// `None` when there is no active gesture or the sample yields nothing
    /// for this frame.
    pub fn update_gesture(
        &mut self,
        viewport: &Viewport,
        sample: &PointerSample,
    ) -> Option<GesturePreview> {
        let pointer = sample.position.map(|p| viewport.to_canvas(p));

        match &mut self.gesture {
            Gesture::Idle => {
                log::trace!("pointer sample with no active gesture ignored");
                None
            }
            Gesture::Drag { session, .. } => session
                .update(pointer, sample.node_position)
                .map(GesturePreview::Positions),
            Gesture::Resize(resize) => {
                let bounds = resize_from_pointer(
                    Some(&resize.snapshot),
                    resize.pointer_start,
                    pointer?,
                    resize.anchor,
                    sample.modifiers.aspect_lock(),
                    resize.floor,
                    resize.target.geometry.rotation(),
                )?;
                resize.last = bounds;
                Some(GesturePreview::Bounds {
                    id: resize.target.id(),
                    bounds,
                })
            }
            Gesture::Rotate(rotate) => {
                let snap = sample
                    .modifiers
                    .snap_rotation()
                    .then_some(self.config.rotation_snap_degrees);
                rotate.rotation = rotation_toward(rotate.center, pointer?, snap);
                Some(GesturePreview::Rotation {
                    id: rotate.target.id(),
                    degrees: rotate.rotation,
                })
            }
        }
    }

    /// End the active gesture and produce its canonical geometry.
    ///
    /// Returns `Ok(None)` when no gesture is active. The gesture is consumed
    /// even when committing fails.
    pub fn commit_gesture(&mut self) -> ManipulationResult<Option<GestureCommit>> {
        let gesture = mem::take(&mut self.gesture);
        let result = match gesture {
            Gesture::Idle => return Ok(None),
            Gesture::Drag {
                session,
                participants,
            } => self.commit_drag(&session, &participants),
            Gesture::Resize(resize) => self.commit_resize(&resize),
            Gesture::Rotate(rotate) => self.commit_rotate(&rotate),
        };

        match result {
            Ok(commit) => {
                log::debug!("gesture committed with {} update(s)", commit.updates.len());
                Ok(Some(commit))
            }
            Err(err) => {
                log::warn!("gesture commit rejected: {err}");
                Err(err)
            }
        }
    }

    /// Discard the active gesture without committing. Returns whether one
    /// was active.
    pub fn cancel_gesture(&mut self) -> bool {
        match mem::take(&mut self.gesture).target() {
            Some(id) => {
                log::debug!("gesture on {id} cancelled");
                true
            }
            None => false,
        }
    }

    /// Handle of `object` under a stage point.
    pub fn handle_at(
        &self,
        viewport: &Viewport,
        object: &SceneObject,
        stage_point: Point,
    ) -> Option<HandleKind> {
        let tolerance = self.config.handle_hit_tolerance / viewport.scale;
        hit_test_handle(&object.geometry, viewport.to_canvas(stage_point), tolerance)
    }

    /// Whether a stage point lies on `object`.
    pub fn hit_test(&self, viewport: &Viewport, object: &SceneObject, stage_point: Point) -> bool {
        let tolerance = self.config.handle_hit_tolerance / viewport.scale;
        object
            .geometry
            .hit_test(viewport.to_canvas(stage_point), tolerance, &self.config)
    }

    fn permits(&self, ctx: &GestureContext, target: &SceneObject, selection: &[SceneObject]) -> bool {
        if !ctx.tool.allows_direct_manipulation() {
            log::debug!("tool {:?} does not manipulate objects", ctx.tool);
            return false;
        }
        if !ctx.can_edit {
            log::debug!("board is read-only, gesture on {} refused", target.id());
            return false;
        }
        if !selection.iter().any(|object| object.id() == target.id()) {
            log::debug!("{} is not selected, gesture refused", target.id());
            return false;
        }
        true
    }

    fn replace_gesture(&mut self, gesture: Gesture) {
        if let Some(stale) = self.gesture.target() {
            log::warn!("gesture on {stale} replaced before it was committed");
        }
        self.gesture = gesture;
    }

    fn commit_drag(
        &self,
        session: &DragSession,
        participants: &[SceneObject],
    ) -> ManipulationResult<GestureCommit> {
        let delta = session.delta();
        let mut commit = GestureCommit::default();
        for object in participants {
            self.registry.resolve(object.kind(), &object.geometry)?;
            commit.updates.push(ObjectUpdate {
                id: object.id(),
                geometry: object.geometry.translate(delta).to_update(),
            });
        }
        Ok(commit)
    }

    fn commit_resize(&self, resize: &ResizeGesture) -> ManipulationResult<GestureCommit> {
        let target = &resize.target;
        let family = self.registry.resolve(target.kind(), &target.geometry)?;
        let geometry = target.geometry.from_bounds(&resize.last, resize.min_size);

        let mut commit = GestureCommit::default();
        commit.updates.push(ObjectUpdate {
            id: target.id(),
            geometry: geometry.to_update(),
        });
        if family.needs_relayout() {
            commit.relayout.push(target.id());
        }
        Ok(commit)
    }

    fn commit_rotate(&self, rotate: &RotateGesture) -> ManipulationResult<GestureCommit> {
        let target = &rotate.target;
        self.registry.resolve(target.kind(), &target.geometry)?;
        let Some(geometry) = target.geometry.as_box() else {
            return Err(ManipulationError::RotationUnsupported {
                kind: target.kind().clone(),
            });
        };

        Ok(GestureCommit {
            updates: vec![ObjectUpdate {
                id: target.id(),
                geometry: geometry.clone().with_rotation(rotate.rotation).to_update(),
            }],
            relayout: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::objects::{BoxGeometry, ConnectorGeometry, InkGeometry, ObjectGeometry, ObjectKind};
    use kurbo::{Size, Vec2};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> SceneObject {
        SceneObject::new(
            ObjectKind::Rectangle,
            ObjectGeometry::Box(BoxGeometry::new(Point::new(x, y), w, h)),
        )
    }

    fn select_ctx() -> GestureContext {
        GestureContext::new(Viewport::default(), ToolKind::Select, true)
    }

    fn box_update(commit: &GestureCommit, id: ObjectId) -> (Point, Size, Option<f64>) {
        let update = commit
            .updates
            .iter()
            .find(|u| u.id == id)
            .expect("missing update");
        match &update.geometry {
            CanonicalGeometryUpdate::Box {
                position,
                dimensions,
                rotation,
            } => (*position, *dimensions, *rotation),
            other => panic!("expected box update, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_scenario_through_zoomed_viewport() {
        let viewport = Viewport::new(Vec2::new(50.0, -20.0), 2.0);
        let ctx = GestureContext::new(viewport, ToolKind::Select, true);
        let object = rect(100.0, 100.0, 50.0, 50.0);
        let mut manipulator = Manipulator::default();

        let start = viewport.to_stage(Point::new(150.0, 150.0));
        assert!(manipulator.begin_resize(
            &ctx,
            &object,
            std::slice::from_ref(&object),
            Some(Anchor::BottomRight),
            Some(start),
        ));

        let current = viewport.to_stage(Point::new(180.0, 160.0));
        let preview = manipulator
            .update_gesture(&viewport, &PointerSample::at(current))
            .unwrap();
        let GesturePreview::Bounds { bounds, .. } = preview else {
            panic!("expected bounds preview");
        };
        assert!((bounds.width - 80.0).abs() < 1e-9);
        assert!((bounds.height - 60.0).abs() < 1e-9);

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        assert_eq!(commit.updates.len(), 1);
        let (position, dimensions, rotation) = box_update(&commit, object.id());
        assert!((position - Point::new(100.0, 100.0)).hypot() < 1e-9);
        assert!((dimensions.width - 80.0).abs() < 1e-9);
        assert!((dimensions.height - 60.0).abs() < 1e-9);
        assert_eq!(rotation, Some(0.0));
        assert!(commit.relayout.is_empty());
    }

    #[test]
    fn test_resize_clamps_to_min_size() {
        let ctx = select_ctx();
        let object = rect(100.0, 100.0, 50.0, 50.0);
        let mut manipulator = Manipulator::default();

        manipulator.begin_resize(
            &ctx,
            &object,
            std::slice::from_ref(&object),
            None,
            Some(Point::new(150.0, 150.0)),
        );
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(105.0, 105.0)));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        let (position, dimensions, _) = box_update(&commit, object.id());
        assert_eq!(position, Point::new(100.0, 100.0));
        assert!((dimensions.width - 20.0).abs() < 1e-9);
        assert!((dimensions.height - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_object_min_size_override() {
        let ctx = select_ctx();
        let mut object = rect(0.0, 0.0, 100.0, 100.0);
        object.min_size = Some(60.0);
        let mut manipulator = Manipulator::default();

        manipulator.begin_resize(
            &ctx,
            &object,
            std::slice::from_ref(&object),
            Some(Anchor::Right),
            Some(Point::new(100.0, 50.0)),
        );
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(0.0, 50.0)));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        let (_, dimensions, _) = box_update(&commit, object.id());
        assert!((dimensions.width - 60.0).abs() < 1e-9);
        assert!((dimensions.height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_drag_scenario() {
        let ctx = select_ctx();
        let selection = vec![
            rect(0.0, 0.0, 40.0, 40.0),
            rect(100.0, 0.0, 40.0, 40.0),
            rect(0.0, 100.0, 40.0, 40.0),
        ];
        let mut manipulator = Manipulator::default();

        assert!(manipulator.begin_drag(&ctx, &selection[0], &selection, Some(Point::new(10.0, 10.0))));
        let preview = manipulator
            .update_gesture(&ctx.viewport, &PointerSample::at(Point::new(30.0, 30.0)))
            .unwrap();
        let GesturePreview::Positions(positions) = preview else {
            panic!("expected positions preview");
        };
        assert_eq!(positions[&selection[1].id()], Point::new(120.0, 20.0));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        assert_eq!(commit.updates.len(), 3);
        let expected = [
            Point::new(20.0, 20.0),
            Point::new(120.0, 20.0),
            Point::new(20.0, 120.0),
        ];
        for (object, expected) in selection.iter().zip(expected) {
            let (position, dimensions, _) = box_update(&commit, object.id());
            assert_eq!(position, expected);
            assert_eq!(dimensions, Size::new(40.0, 40.0));
        }
    }

    #[test]
    fn test_drag_falls_back_to_node_position() {
        let ctx = select_ctx();
        let object = rect(10.0, 10.0, 40.0, 40.0);
        let mut manipulator = Manipulator::default();

        manipulator.begin_drag(&ctx, &object, std::slice::from_ref(&object), None);
        let sample = PointerSample::default().with_node_position(Point::new(15.0, 30.0));
        assert!(manipulator.update_gesture(&ctx.viewport, &sample).is_some());

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        let (position, _, _) = box_update(&commit, object.id());
        assert_eq!(position, Point::new(15.0, 30.0));
    }

    #[test]
    fn test_stale_move_after_commit_is_ignored() {
        let ctx = select_ctx();
        let object = rect(0.0, 0.0, 40.0, 40.0);
        let mut manipulator = Manipulator::default();

        manipulator.begin_drag(&ctx, &object, std::slice::from_ref(&object), Some(Point::ZERO));
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(5.0, 5.0)));
        assert!(manipulator.commit_gesture().unwrap().is_some());

        assert!(!manipulator.is_active());
        assert!(manipulator
            .update_gesture(&ctx.viewport, &PointerSample::at(Point::new(50.0, 50.0)))
            .is_none());
        assert!(manipulator.commit_gesture().unwrap().is_none());
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let ctx = select_ctx();
        let object = rect(0.0, 0.0, 40.0, 40.0);
        let mut manipulator = Manipulator::default();

        manipulator.begin_drag(&ctx, &object, std::slice::from_ref(&object), Some(Point::ZERO));
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(5.0, 5.0)));
        assert_eq!(manipulator.active_target(), Some(object.id()));

        assert!(manipulator.cancel_gesture());
        assert!(!manipulator.cancel_gesture());
        assert!(manipulator.commit_gesture().unwrap().is_none());
    }

    #[test]
    fn test_permission_checks() {
        let object = rect(0.0, 0.0, 40.0, 40.0);
        let other = rect(100.0, 0.0, 40.0, 40.0);
        let selection = std::slice::from_ref(&object);
        let mut manipulator = Manipulator::default();

        let pan = GestureContext::new(Viewport::default(), ToolKind::Pan, true);
        assert!(!manipulator.begin_drag(&pan, &object, selection, None));

        let read_only = GestureContext::new(Viewport::default(), ToolKind::Select, false);
        assert!(!manipulator.begin_drag(&read_only, &object, selection, None));

        assert!(!manipulator.begin_drag(&select_ctx(), &other, selection, None));
        assert!(!manipulator.is_active());
    }

    #[test]
    fn test_unregistered_kind_fails_commit() {
        let ctx = select_ctx();
        let object = SceneObject::new(
            ObjectKind::Custom("widget".to_string()),
            ObjectGeometry::Box(BoxGeometry::new(Point::ZERO, 40.0, 40.0)),
        );
        let mut manipulator = Manipulator::default();

        assert!(manipulator.begin_drag(&ctx, &object, std::slice::from_ref(&object), Some(Point::ZERO)));
        let err = manipulator.commit_gesture().unwrap_err();
        assert!(matches!(err, ManipulationError::NoAdapter { .. }));
        assert!(!manipulator.is_active());
    }

    #[test]
    fn test_frame_resize_requests_relayout() {
        let ctx = select_ctx();
        let frame = SceneObject::new(
            ObjectKind::Frame,
            ObjectGeometry::Box(BoxGeometry::new(Point::ZERO, 400.0, 300.0)),
        );
        let mut manipulator = Manipulator::default();

        manipulator.begin_resize(
            &ctx,
            &frame,
            std::slice::from_ref(&frame),
            Some(Anchor::BottomRight),
            Some(Point::new(400.0, 300.0)),
        );
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(450.0, 300.0)));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        assert_eq!(commit.relayout, vec![frame.id()]);
    }

    #[test]
    fn test_rotate_snaps_with_shift() {
        let ctx = select_ctx();
        let object = rect(-50.0, -50.0, 100.0, 100.0);
        let mut manipulator = Manipulator::default();

        assert!(manipulator
            .begin_rotate(&ctx, &object, std::slice::from_ref(&object))
            .unwrap());

        let angle = 40f64.to_radians();
        let pointer = Point::new(100.0 * angle.sin(), -100.0 * angle.cos());
        let sample = PointerSample::at(pointer).with_modifiers(Modifiers::shift());
        let preview = manipulator.update_gesture(&ctx.viewport, &sample).unwrap();
        let GesturePreview::Rotation { degrees, .. } = preview else {
            panic!("expected rotation preview");
        };
        assert!((degrees - 45.0).abs() < 1e-9);

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        let (position, _, rotation) = box_update(&commit, object.id());
        assert_eq!(position, Point::new(-50.0, -50.0));
        assert!((rotation.unwrap() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_refused_for_connectors() {
        let ctx = select_ctx();
        let line = SceneObject::new(
            ObjectKind::Line,
            ObjectGeometry::Connector(ConnectorGeometry::new(Point::ZERO, Point::new(50.0, 0.0))),
        );
        let mut manipulator = Manipulator::default();

        let err = manipulator
            .begin_rotate(&ctx, &line, std::slice::from_ref(&line))
            .unwrap_err();
        assert!(matches!(err, ManipulationError::RotationUnsupported { .. }));
    }

    #[test]
    fn test_connector_resize_keeps_direction() {
        let ctx = select_ctx();
        let line = SceneObject::new(
            ObjectKind::Arrow,
            ObjectGeometry::Connector(ConnectorGeometry::new(
                Point::new(100.0, 100.0),
                Point::new(0.0, 0.0),
            )),
        );
        let mut manipulator = Manipulator::default();

        manipulator.begin_resize(
            &ctx,
            &line,
            std::slice::from_ref(&line),
            Some(Anchor::BottomRight),
            Some(Point::new(100.0, 100.0)),
        );
        manipulator.update_gesture(&ctx.viewport, &PointerSample::at(Point::new(200.0, 150.0)));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        assert_eq!(
            commit.updates[0].geometry,
            CanonicalGeometryUpdate::Connector {
                start: Point::new(200.0, 150.0),
                end: Point::new(0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_handle_tolerance_scales_with_zoom() {
        let viewport = Viewport::new(Vec2::ZERO, 2.0);
        let object = rect(0.0, 0.0, 100.0, 50.0);
        let manipulator = Manipulator::default();

        // Bottom-right handle sits at stage (200, 100).
        assert_eq!(
            manipulator.handle_at(&viewport, &object, Point::new(208.0, 100.0)),
            Some(HandleKind::Resize(Anchor::BottomRight))
        );
        assert_eq!(manipulator.handle_at(&viewport, &object, Point::new(215.0, 100.0)), None);
        assert!(manipulator.hit_test(&viewport, &object, Point::new(100.0, 50.0)));
        assert!(!manipulator.hit_test(&viewport, &object, Point::new(300.0, 50.0)));
    }

    #[test]
    fn test_new_gesture_replaces_stale_one() {
        let ctx = select_ctx();
        let a = rect(0.0, 0.0, 40.0, 40.0);
        let b = rect(100.0, 0.0, 40.0, 40.0);
        let selection = vec![a.clone(), b.clone()];
        let mut manipulator = Manipulator::default();

        manipulator.begin_drag(&ctx, &a, &selection, Some(Point::ZERO));
        manipulator.begin_resize(&ctx, &b, &selection, None, Some(Point::new(140.0, 40.0)));
        assert_eq!(manipulator.active_target(), Some(b.id()));

        let commit = manipulator.commit_gesture().unwrap().unwrap();
        assert_eq!(commit.updates.len(), 1);
        assert_eq!(commit.updates[0].id, b.id());
    }

    fn connector(start: Point, end: Point) -> SceneObject {
        SceneObject::new(
            ObjectKind::Line,
            ObjectGeometry::Connector(ConnectorGeometry::new(start, end)),
        )
    }

    fn resize_and_commit(
        object: &SceneObject,
        anchor: Anchor,
        from: Point,
        to: PointerSample,
    ) -> GestureCommit {
        let ctx = select_ctx();
        let mut manipulator = Manipulator::default();
        assert!(manipulator.begin_resize(
            &ctx,
            object,
            std::slice::from_ref(object),
            Some(anchor),
            Some(from),
        ));
        manipulator.update_gesture(&ctx.viewport, &to);
        manipulator.commit_gesture().unwrap().unwrap()
    }

    #[test]
    fn test_thin_connector_stretches_without_tilting() {
        let line = connector(Point::new(0.0, 0.0), Point::new(100.0, 2.0));
        let commit = resize_and_commit(
            &line,
            Anchor::Right,
            Point::new(100.0, 1.0),
            PointerSample::at(Point::new(110.0, 1.0)),
        );
        assert_eq!(
            commit.updates[0].geometry,
            CanonicalGeometryUpdate::Connector {
                start: Point::new(0.0, 0.0),
                end: Point::new(110.0, 2.0),
            }
        );
    }

    #[test]
    fn test_collapsed_connector_keeps_min_length_on_its_axis() {
        let line = connector(Point::new(0.0, 0.0), Point::new(30.0, 2.0));
        let commit = resize_and_commit(
            &line,
            Anchor::BottomRight,
            Point::new(30.0, 2.0),
            PointerSample::at(Point::new(5.0, 2.0)),
        );
        let CanonicalGeometryUpdate::Connector { start, end } = &commit.updates[0].geometry else {
            panic!("expected connector update");
        };
        assert_eq!(*start, Point::new(0.0, 0.0));
        assert_eq!(*end, Point::new(20.0, 0.0));
        assert!((ConnectorGeometry::new(*start, *end).length() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_thin_ink_stroke_keeps_its_height() {
        let stroke = SceneObject::new(
            ObjectKind::Ink,
            ObjectGeometry::Ink(InkGeometry::new(vec![
                Point::new(0.0, 0.0),
                Point::new(50.0, 2.0),
                Point::new(100.0, 0.0),
            ])),
        );
        let commit = resize_and_commit(
            &stroke,
            Anchor::Right,
            Point::new(100.0, 1.0),
            PointerSample::at(Point::new(110.0, 1.0)),
        );
        let CanonicalGeometryUpdate::Ink { points } = &commit.updates[0].geometry else {
            panic!("expected ink update");
        };
        let expected = [[0.0, 0.0], [55.0, 2.0], [110.0, 0.0]];
        assert_eq!(points.len(), expected.len());
        for (got, want) in points.iter().zip(expected) {
            assert!((got[0] - want[0]).abs() < 1e-9);
            assert!((got[1] - want[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_thin_box_edge_resize_leaves_height_alone() {
        let object = rect(0.0, 0.0, 100.0, 2.0);
        let commit = resize_and_commit(
            &object,
            Anchor::Right,
            Point::new(100.0, 1.0),
            PointerSample::at(Point::new(110.0, 1.0)),
        );
        let (position, dimensions, _) = box_update(&commit, object.id());
        assert_eq!(position, Point::new(0.0, 0.0));
        assert!((dimensions.width - 110.0).abs() < 1e-9);
        assert!((dimensions.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_shift_locks_aspect_during_update() {
        let object = rect(0.0, 0.0, 100.0, 50.0);
        let commit = resize_and_commit(
            &object,
            Anchor::BottomRight,
            Point::new(100.0, 50.0),
            PointerSample::at(Point::new(200.0, 60.0)).with_modifiers(Modifiers::shift()),
        );
        let (position, dimensions, _) = box_update(&commit, object.id());
        assert_eq!(position, Point::new(0.0, 0.0));
        assert!((dimensions.width - 120.0).abs() < 1e-9);
        assert!((dimensions.height - 60.0).abs() < 1e-9);
    }
}
