//! Document model: placed objects, their transforms, room parameters, and the
//! in-memory scene that owns them.
//!
//! This module defines what is in a room (`PlacedObject`, `Transform`), the
//! room-level settings shared by every object (`RoomParameters`), and the
//! runtime store for one design in progress (`SceneModel`).
//!
//! Data flows into this layer from the persistence adapter (hydration from a
//! stored document) and from the engine (user mutations). The external
//! renderer reads `SceneModel::objects` in order; insertion order is render
//! order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FLOOR_COLOR, DEFAULT_PLAN_WALL_COLOR, DEFAULT_ROOM_HEIGHT_FT, DEFAULT_ROOM_HEIGHT_M,
    DEFAULT_ROOM_LENGTH_M, DEFAULT_ROOM_WIDTH_FT, DEFAULT_ROOM_WIDTH_M, DEFAULT_SCALE_3D, DEFAULT_SIZE_2D,
    DEFAULT_SPATIAL_WALL_COLOR, MIN_SCALE_3D,
};
use crate::error::SceneError;

/// Identifier of a placed object: the creation timestamp in milliseconds.
pub type ObjectId = i64;

/// Which editor a design belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Top-down plan view with raster sprites.
    #[serde(rename = "2D")]
    Plan,
    /// Perspective room with 3D models.
    #[serde(rename = "3D")]
    Spatial,
}

impl Mode {
    /// Wire name of the mode (`"2D"` or `"3D"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "2D",
            Self::Spatial => "3D",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2D" | "2d" => Ok(Self::Plan),
            "3D" | "3d" => Ok(Self::Spatial),
            other => Err(SceneError::UnknownMode(other.to_owned())),
        }
    }
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// Plan-view placement. Rotations are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Left edge in room units.
    pub x: f64,
    /// Top edge in room units.
    pub y: f64,
    /// Width in room units.
    pub width: f64,
    /// Height in room units.
    pub height: f64,
    /// Tilt about the horizontal screen axis, in degrees.
    pub rotate_x: f64,
    /// Tilt about the vertical screen axis, in degrees.
    pub rotate_y: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, width: DEFAULT_SIZE_2D, height: DEFAULT_SIZE_2D, rotate_x: 0.0, rotate_y: 0.0 }
    }
}

impl Transform2D {
    /// Whether `(px, py)` lies inside the unrotated bounding box.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Scene-view placement. Rotation is in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self { position: [0.0; 3], rotation: [0.0; 3], scale: [DEFAULT_SCALE_3D; 3] }
    }
}

impl Transform3D {
    /// Raise every scale component to at least [`MIN_SCALE_3D`].
    pub fn clamp_scale(&mut self) {
        for s in &mut self.scale {
            *s = s.max(MIN_SCALE_3D);
        }
    }

    /// Whether every component of every vector is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(&self.rotation)
            .chain(&self.scale)
            .all(|v| v.is_finite())
    }
}

/// A placed object's transform, tagged by editor mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Transform {
    #[serde(rename = "2D")]
    Plan(Transform2D),
    #[serde(rename = "3D")]
    Spatial(Transform3D),
}

impl Transform {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Plan(_) => Mode::Plan,
            Self::Spatial(_) => Mode::Spatial,
        }
    }

    #[must_use]
    pub fn as_plan(&self) -> Option<&Transform2D> {
        match self {
            Self::Plan(t) => Some(t),
            Self::Spatial(_) => None,
        }
    }

    #[must_use]
    pub fn as_spatial(&self) -> Option<&Transform3D> {
        match self {
            Self::Spatial(t) => Some(t),
            Self::Plan(_) => None,
        }
    }
}

// =============================================================================
// PLACED OBJECT
// =============================================================================

/// File format of a 3D model reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Obj,
    Glb,
}

impl ModelFormat {
    /// Infer the format from a model path. Anything not ending in `.glb` is OBJ.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".glb") { Self::Glb } else { Self::Obj }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Glb => "glb",
        }
    }
}

/// One furniture instance inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique within the scene; never reused by clones.
    pub id: ObjectId,
    /// Catalog key the object was created from (`"chair1blue"`, `"Chair1"`).
    pub catalog_type: String,
    /// Image path (2D) or model path (3D).
    pub asset_ref: String,
    /// Placement, tagged by mode.
    pub transform: Transform,
    /// Material tint for models that support one.
    pub color: Option<String>,
}

impl PlacedObject {
    /// Build a plan-view object.
    #[must_use]
    pub fn plan(id: ObjectId, catalog_type: &str, asset_ref: &str, transform: Transform2D) -> Self {
        Self {
            id,
            catalog_type: catalog_type.to_owned(),
            asset_ref: asset_ref.to_owned(),
            transform: Transform::Plan(transform),
            color: None,
        }
    }

    /// Build a scene-view object.
    #[must_use]
    pub fn spatial(
        id: ObjectId,
        catalog_type: &str,
        asset_ref: &str,
        transform: Transform3D,
        color: Option<String>,
    ) -> Self {
        Self {
            id,
            catalog_type: catalog_type.to_owned(),
            asset_ref: asset_ref.to_owned(),
            transform: Transform::Spatial(transform),
            color,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.transform.mode()
    }

    /// Final path segment of the asset reference.
    #[must_use]
    pub fn asset_file_name(&self) -> &str {
        asset_file_name(&self.asset_ref)
    }

    /// Model format for 3D objects; `None` for plan-view sprites.
    #[must_use]
    pub fn model_format(&self) -> Option<ModelFormat> {
        match self.transform {
            Transform::Spatial(_) => Some(ModelFormat::from_path(&self.asset_ref)),
            Transform::Plan(_) => None,
        }
    }
}

/// Final `/`-separated segment of an asset path.
#[must_use]
pub fn asset_file_name(asset_ref: &str) -> &str {
    asset_ref.rsplit('/').next().unwrap_or(asset_ref)
}

// =============================================================================
// ROOM PARAMETERS
// =============================================================================

/// Plan-view room. Dimensions are in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRoom {
    pub width_ft: f64,
    pub height_ft: f64,
    /// Opaque reference to an uploaded background image.
    pub background: Option<String>,
    pub wall_color: String,
}

impl Default for PlanRoom {
    fn default() -> Self {
        Self {
            width_ft: DEFAULT_ROOM_WIDTH_FT,
            height_ft: DEFAULT_ROOM_HEIGHT_FT,
            background: None,
            wall_color: DEFAULT_PLAN_WALL_COLOR.to_owned(),
        }
    }
}

/// Scene-view room. Dimensions are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRoom {
    pub width_m: f64,
    pub length_m: f64,
    pub height_m: f64,
    pub wall_color: String,
    pub floor_color: String,
}

impl Default for SpatialRoom {
    fn default() -> Self {
        Self {
            width_m: DEFAULT_ROOM_WIDTH_M,
            length_m: DEFAULT_ROOM_LENGTH_M,
            height_m: DEFAULT_ROOM_HEIGHT_M,
            wall_color: DEFAULT_SPATIAL_WALL_COLOR.to_owned(),
            floor_color: DEFAULT_FLOOR_COLOR.to_owned(),
        }
    }
}

/// Room-level settings, tagged by mode. Units are never converted between modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RoomParameters {
    #[serde(rename = "2D")]
    Plan(PlanRoom),
    #[serde(rename = "3D")]
    Spatial(SpatialRoom),
}

impl RoomParameters {
    /// Default room for a mode.
    #[must_use]
    pub fn default_for(mode: Mode) -> Self {
        match mode {
            Mode::Plan => Self::Plan(PlanRoom::default()),
            Mode::Spatial => Self::Spatial(SpatialRoom::default()),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Plan(_) => Mode::Plan,
            Self::Spatial(_) => Mode::Spatial,
        }
    }
}

// =============================================================================
// SCENE MODEL
// =============================================================================

/// Authoritative state of one design in progress.
///
/// Invariants: object ids are unique, and every object's transform (and the
/// room) matches `mode`. Selection lives in the engine, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneModel {
    mode: Mode,
    objects: Vec<PlacedObject>,
    room: RoomParameters,
}

impl SceneModel {
    /// Create an empty scene with the default room for `mode`.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self { mode, objects: Vec::new(), room: RoomParameters::default_for(mode) }
    }

    /// Create an empty scene around an existing room.
    #[must_use]
    pub fn with_room(room: RoomParameters) -> Self {
        Self { mode: room.mode(), objects: Vec::new(), room }
    }

    /// Assemble a scene, checking the id and mode invariants.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `ModeMismatch` if any object violates them.
    pub fn from_parts(room: RoomParameters, objects: Vec<PlacedObject>) -> Result<Self, SceneError> {
        let mut scene = Self::with_room(room);
        for obj in objects {
            scene.insert(obj)?;
        }
        Ok(scene)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn room(&self) -> &RoomParameters {
        &self.room
    }

    pub(crate) fn room_mut(&mut self) -> &mut RoomParameters {
        &mut self.room
    }

    /// Objects in render order.
    #[must_use]
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    /// Look up an object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Append an object on top of the render order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is taken, `ModeMismatch` if the
    /// object's transform belongs to the other mode.
    pub fn insert(&mut self, obj: PlacedObject) -> Result<(), SceneError> {
        if obj.mode() != self.mode {
            return Err(SceneError::ModeMismatch { expected: self.mode, found: obj.mode() });
        }
        if self.contains(obj.id) {
            return Err(SceneError::DuplicateId(obj.id));
        }
        self.objects.push(obj);
        Ok(())
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(idx))
    }

    /// Largest object id in the scene, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<ObjectId> {
        self.objects.iter().map(|o| o.id).max()
    }

    /// Number of objects currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
