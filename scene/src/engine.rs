//! Scene engine: the single writer of scene state.
//!
//! DESIGN
//! ======
//! Every change to a design goes through `EngineCore`. Hosts forward user
//! intent (catalog picks, property edits, pointer and key events, manipulator
//! callbacks) and receive a `Vec<Action>` describing what changed, which they
//! hand to the external renderer. The engine never renders and never does I/O.
//!
//! Selection is exclusive and lives here, not in the scene. The `SyncState`
//! machine decides which continuous writer (pointer drag in plan view,
//! manipulator in scene view) may touch the selected object's transform.
//! Discrete writers (field edits, step controls, arrow keys) always apply.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::clock::IdClock;
use crate::consts::{
    CLONE_OFFSET_3D, DEFAULT_MODEL_COLOR, GRID_PITCH, KEY_STEP_3D, MIN_SCALE_3D, MIN_SIZE_2D, ROTATE_STEP_2D_DEG,
    ROTATE_STEP_3D_RAD, SCALE_STEP_2D, SCALE_STEP_3D,
};
use crate::doc::{
    Mode, ModelFormat, ObjectId, PlacedObject, RoomParameters, SceneModel, Transform, Transform2D, Transform3D,
};
use crate::error::SceneError;
use crate::field::{ObjectField, RoomField, parse_lenient};
use crate::grid::snap_point;
use crate::hit::hit_test;
use crate::input::{Button, Key, ManipulatorReading, StepControl, SyncState};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Changes reported to the host after each handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(PlacedObject),
    /// The object's state after the change.
    ObjectUpdated(PlacedObject),
    ObjectDeleted { id: ObjectId },
    SelectionChanged(Option<ObjectId>),
    ManipulatorAttached { id: ObjectId },
    ManipulatorDetached { id: ObjectId },
    RoomUpdated(RoomParameters),
    RenderNeeded,
}

/// Core engine state for one open design.
#[derive(Debug, Clone)]
pub struct EngineCore {
    scene: SceneModel,
    catalog: Catalog,
    selection: Option<ObjectId>,
    state: SyncState,
    clock: IdClock,
    viewport: Viewport,
}

impl EngineCore {
    /// Engine over an empty scene with the default room for `mode`.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::from_scene(SceneModel::new(mode))
    }

    /// Engine over an existing scene. Nothing is selected.
    #[must_use]
    pub fn from_scene(scene: SceneModel) -> Self {
        let mut clock = IdClock::new();
        if let Some(max) = scene.max_id() {
            clock.observe(max);
        }
        Self {
            scene,
            catalog: Catalog::furniture(),
            selection: None,
            state: SyncState::Idle,
            clock,
            viewport: Viewport::default(),
        }
    }

    // --- Data inputs ---

    /// Replace the scene with a freshly loaded one.
    ///
    /// Selection is cleared, any drag or manipulator attachment ends, and the
    /// id clock moves past every loaded id.
    pub fn load_scene(&mut self, scene: SceneModel) -> Vec<Action> {
        let mut actions = self.release_writer();
        self.selection = None;
        if let Some(max) = scene.max_id() {
            self.clock.observe(max);
        }
        debug!(mode = %scene.mode(), count = scene.len(), "scene loaded");
        self.scene = scene;
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Update where the plan canvas sits in the host's client area.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Object lifecycle ---

    /// Place a new object from the catalog and select it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAsset` if `catalog_type` is not in the catalog for the
    /// scene's mode, or `IdsExhausted` if no fresh id is left. The scene is
    /// unchanged.
    pub fn add_object(&mut self, catalog_type: &str) -> Result<Vec<Action>, SceneError> {
        let entry = self.catalog.lookup(self.scene.mode(), catalog_type)?;
        let id = self.clock.next()?;
        let obj = match entry.mode {
            Mode::Plan => PlacedObject::plan(id, entry.catalog_type, entry.asset_ref, Transform2D::default()),
            Mode::Spatial => {
                let color = match ModelFormat::from_path(entry.asset_ref) {
                    ModelFormat::Glb => Some(DEFAULT_MODEL_COLOR.to_owned()),
                    ModelFormat::Obj => None,
                };
                PlacedObject::spatial(id, entry.catalog_type, entry.asset_ref, Transform3D::default(), color)
            }
        };
        self.scene.insert(obj.clone())?;
        debug!(id, catalog_type, "object added");

        let mut actions = vec![Action::ObjectCreated(obj)];
        actions.extend(self.select(id)?);
        Ok(actions)
    }

    /// Remove an object. Clears the selection if it pointed at it.
    ///
    /// Removing an absent id is a no-op.
    pub fn remove_object(&mut self, id: ObjectId) -> Vec<Action> {
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        debug!(id, "object removed");

        let mut actions = Vec::new();
        if self.state.target() == Some(id) {
            actions.extend(self.release_writer());
        }
        if self.selection == Some(id) {
            self.selection = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::ObjectDeleted { id });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Duplicate an object with a fresh id, offset from the source, and select the copy.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if `id` is not in the scene, or `IdsExhausted`
    /// if no fresh id is left.
    pub fn clone_object(&mut self, id: ObjectId) -> Result<Vec<Action>, SceneError> {
        let mut copy = self.scene.get(id).cloned().ok_or(SceneError::ObjectNotFound(id))?;
        copy.id = self.clock.next()?;
        match &mut copy.transform {
            Transform::Plan(t) => {
                t.x += GRID_PITCH;
                t.y += GRID_PITCH;
            }
            Transform::Spatial(t) => {
                t.position[0] += CLONE_OFFSET_3D;
                t.position[2] += CLONE_OFFSET_3D;
            }
        }
        let new_id = copy.id;
        self.scene.insert(copy.clone())?;
        debug!(source = id, id = new_id, "object cloned");

        let mut actions = vec![Action::ObjectCreated(copy)];
        actions.extend(self.select(new_id)?);
        Ok(actions)
    }

    // --- Property edits ---

    /// Set one property of an object from raw editor text.
    ///
    /// Numeric fields parse leniently (garbage becomes `0`); 3D scale is
    /// clamped to its minimum. Edits never move the object onto the grid.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for names not valid in the scene's mode and
    /// `ObjectNotFound` for absent ids.
    pub fn update_field(&mut self, id: ObjectId, name: &str, raw: &str) -> Result<Vec<Action>, SceneError> {
        let mode = self.scene.mode();
        let field = ObjectField::parse(mode, name)?;
        let obj = self.scene.get_mut(id).ok_or(SceneError::ObjectNotFound(id))?;
        apply_field(obj, field, raw).map_err(|()| SceneError::UnknownField { mode, field: name.to_owned() })?;
        Ok(vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded])
    }

    /// Set one room property from raw editor text.
    ///
    /// An empty `background` clears the background image.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for names not valid in the scene's mode.
    pub fn update_room(&mut self, name: &str, raw: &str) -> Result<Vec<Action>, SceneError> {
        let mode = self.scene.mode();
        let field = RoomField::parse(mode, name)?;
        apply_room_field(self.scene.room_mut(), field, raw)
            .map_err(|()| SceneError::UnknownField { mode, field: name.to_owned() })?;
        Ok(vec![Action::RoomUpdated(self.scene.room().clone()), Action::RenderNeeded])
    }

    /// Apply a scale or rotate step to the selected object.
    ///
    /// Does nothing when nothing is selected.
    pub fn step(&mut self, control: StepControl) -> Vec<Action> {
        let Some(id) = self.selection else {
            return Vec::new();
        };
        let Some(obj) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        let sign = control.sign();
        match (&mut obj.transform, control.is_scale()) {
            (Transform::Plan(t), true) => {
                t.width = (t.width + sign * SCALE_STEP_2D).max(MIN_SIZE_2D);
                t.height = (t.height + sign * SCALE_STEP_2D).max(MIN_SIZE_2D);
            }
            (Transform::Plan(t), false) => t.rotate_y += sign * ROTATE_STEP_2D_DEG,
            (Transform::Spatial(t), true) => {
                for s in &mut t.scale {
                    *s = (*s + sign * SCALE_STEP_3D).max(MIN_SCALE_3D);
                }
            }
            (Transform::Spatial(t), false) => t.rotation[1] += sign * ROTATE_STEP_3D_RAD,
        }
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    // --- Selection ---

    /// Select `id` exclusively.
    ///
    /// The previous selection is released first. In scene view the
    /// manipulator attaches to the new selection.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if `id` is not in the scene.
    pub fn select(&mut self, id: ObjectId) -> Result<Vec<Action>, SceneError> {
        if !self.scene.contains(id) {
            return Err(SceneError::ObjectNotFound(id));
        }
        if self.selection == Some(id) && !self.state.is_dragging() {
            return Ok(Vec::new());
        }

        let mut actions = self.release_writer();
        self.selection = Some(id);
        actions.push(Action::SelectionChanged(Some(id)));
        if self.scene.mode() == Mode::Spatial {
            self.state = SyncState::ManipulatorAttached { id };
            actions.push(Action::ManipulatorAttached { id });
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Clear the selection and detach any writer.
    pub fn deselect(&mut self) -> Vec<Action> {
        if self.selection.is_none() && self.state == SyncState::Idle {
            return Vec::new();
        }
        let mut actions = self.release_writer();
        self.selection = None;
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input (plan view) ---

    /// Start a drag on the topmost object under the pointer, or clear the
    /// selection on empty canvas.
    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button) -> Vec<Action> {
        if self.scene.mode() != Mode::Plan || button != Button::Primary {
            return Vec::new();
        }
        if self.state.is_dragging() {
            self.state = SyncState::Idle;
        }

        let room_pt = self.viewport.client_to_room(client_pt);
        let Some(id) = hit_test(room_pt, &self.scene) else {
            return self.deselect();
        };
        let Some(origin) = self.plan_origin(id) else {
            return Vec::new();
        };
        // Hit ids always exist, so select cannot fail here.
        let actions = self.select(id).unwrap_or_default();
        self.state = SyncState::Dragging { id, offset: room_pt - origin };
        actions
    }

    /// Move the dragged object so it follows the pointer, snapped to the grid.
    pub fn on_pointer_move(&mut self, client_pt: Point) -> Vec<Action> {
        let SyncState::Dragging { id, offset } = self.state else {
            return Vec::new();
        };
        let target = snap_point(self.viewport.client_to_room(client_pt) - offset);

        let Some(obj) = self.scene.get_mut(id) else {
            self.state = SyncState::Idle;
            return Vec::new();
        };
        let Transform::Plan(t) = &mut obj.transform else {
            return Vec::new();
        };
        if Point::new(t.x, t.y) == target {
            return Vec::new();
        }
        t.x = target.x;
        t.y = target.y;
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    /// End the active drag. The object keeps its last snapped position.
    pub fn on_pointer_up(&mut self, _client_pt: Point, button: Button) -> Vec<Action> {
        if button == Button::Primary && self.state.is_dragging() {
            self.state = SyncState::Idle;
        }
        Vec::new()
    }

    // --- Manipulator input (scene view) ---

    /// Copy the manipulator's live transform into the scene.
    ///
    /// Events for an object the manipulator is no longer attached to are
    /// dropped, as are readings with non-finite components.
    pub fn on_manipulator_change(&mut self, id: ObjectId, reading: ManipulatorReading) -> Vec<Action> {
        if self.state != (SyncState::ManipulatorAttached { id }) {
            debug!(id, "manipulator event for detached object dropped");
            return Vec::new();
        }
        if !reading.is_finite() {
            warn!(id, "non-finite manipulator reading rejected");
            return Vec::new();
        }
        let Some(obj) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        obj.transform = Transform::Spatial(reading.into_transform());
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    // --- Keyboard ---

    /// Handle a key press.
    ///
    /// Arrow keys nudge the selected scene-view object along the ground plane
    /// whether or not the manipulator is attached. Delete and Backspace remove
    /// the selection; Escape clears it.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if *key == Key::Escape {
            return self.deselect();
        }
        let Some(id) = self.selection else {
            return Vec::new();
        };
        if key.is_delete() {
            return self.remove_object(id);
        }
        let Some((dx, dz)) = key.ground_direction() else {
            return Vec::new();
        };
        let Some(obj) = self.scene.get_mut(id) else {
            return Vec::new();
        };
        let Transform::Spatial(t) = &mut obj.transform else {
            return Vec::new();
        };
        t.position[0] += dx * KEY_STEP_3D;
        t.position[2] += dz * KEY_STEP_3D;
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.scene.mode()
    }

    /// The live scene.
    #[must_use]
    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// Deep copy of the scene for saving.
    #[must_use]
    pub fn snapshot(&self) -> SceneModel {
        self.scene.clone()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.scene.get(id)
    }

    // --- Internals ---

    /// Return the sync state to `Idle`, reporting a manipulator detach if one was attached.
    fn release_writer(&mut self) -> Vec<Action> {
        let previous = std::mem::take(&mut self.state);
        match previous {
            SyncState::ManipulatorAttached { id } => vec![Action::ManipulatorDetached { id }],
            SyncState::Idle | SyncState::Dragging { .. } => Vec::new(),
        }
    }

    fn plan_origin(&self, id: ObjectId) -> Option<Point> {
        let t = self.scene.get(id)?.transform.as_plan()?;
        Some(Point::new(t.x, t.y))
    }
}

/// Write a parsed field into an object. `Err` if the field belongs to the
/// other mode's transform.
fn apply_field(obj: &mut PlacedObject, field: ObjectField, raw: &str) -> Result<(), ()> {
    if field == ObjectField::Color {
        obj.color = Some(raw.to_owned());
        return Ok(());
    }
    let value = parse_lenient(raw);
    match (&mut obj.transform, field) {
        (Transform::Plan(t), ObjectField::X) => t.x = value,
        (Transform::Plan(t), ObjectField::Y) => t.y = value,
        (Transform::Plan(t), ObjectField::Width) => t.width = value,
        (Transform::Plan(t), ObjectField::Height) => t.height = value,
        (Transform::Plan(t), ObjectField::RotateX) => t.rotate_x = value,
        (Transform::Plan(t), ObjectField::RotateY) => t.rotate_y = value,
        (Transform::Spatial(t), ObjectField::Position(axis)) => t.position[axis.index()] = value,
        (Transform::Spatial(t), ObjectField::Rotation(axis)) => t.rotation[axis.index()] = value,
        (Transform::Spatial(t), ObjectField::Scale(axis)) => t.scale[axis.index()] = value.max(MIN_SCALE_3D),
        _ => return Err(()),
    }
    Ok(())
}

/// Write a parsed field into the room. `Err` if the field belongs to the
/// other mode's room.
fn apply_room_field(room: &mut RoomParameters, field: RoomField, raw: &str) -> Result<(), ()> {
    match (room, field) {
        (RoomParameters::Plan(r), RoomField::Width) => r.width_ft = parse_lenient(raw),
        (RoomParameters::Plan(r), RoomField::Height) => r.height_ft = parse_lenient(raw),
        (RoomParameters::Plan(r), RoomField::WallColor) => r.wall_color = raw.to_owned(),
        (RoomParameters::Plan(r), RoomField::Background) => {
            r.background = if raw.is_empty() { None } else { Some(raw.to_owned()) };
        }
        (RoomParameters::Spatial(r), RoomField::Width) => r.width_m = parse_lenient(raw),
        (RoomParameters::Spatial(r), RoomField::Length) => r.length_m = parse_lenient(raw),
        (RoomParameters::Spatial(r), RoomField::Height) => r.height_m = parse_lenient(raw),
        (RoomParameters::Spatial(r), RoomField::WallColor) => r.wall_color = raw.to_owned(),
        (RoomParameters::Spatial(r), RoomField::FloorColor) => r.floor_color = raw.to_owned(),
        _ => return Err(()),
    }
    Ok(())
}
