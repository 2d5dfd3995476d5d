//! Persistence adapter: converts between a `SceneModel` and the stored
//! `designData` JSON.
//!
//! DESIGN
//! ======
//! Encoding is strict. A scene is only written when its name and objects are
//! present and every plan-view sprite is on the catalog allow-list; otherwise
//! nothing is produced. Background images are user uploads and are not
//! checked.
//!
//! Decoding is forgiving. Stored documents come from older clients and hand
//! edits, so any missing or malformed field is replaced by its default and
//! reported as a `Recovered` entry instead of failing the load. Objects that
//! cannot be identified at all (no catalog type and no asset) are dropped.
//! Ids must be integers no larger than `MAX_OBJECT_ID`; any other id, and
//! any duplicate, is replaced with a fresh one.
//!
//! WIRE SHAPE
//! ==========
//! Plan view: `{objects, background?, roomWidth, roomHeight, wallColor}`,
//! objects `{id, type, image, x, y, width, height, rotateX, rotateY}`.
//! Scene view: `{objects, roomWidth, roomLength, roomHeight, wallColor,
//! floorColor}`, objects `{id, name, path, type, position, rotation, scale,
//! color?}` with vectors as `[x, y, z]` and `type` the model format.

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;

use std::collections::HashSet;
use std::fmt;

use scene::catalog::Catalog;
use scene::clock::IdClock;
use scene::consts::{DEFAULT_SCALE_3D, DEFAULT_SIZE_2D, MAX_OBJECT_ID};
use scene::doc::{
    Mode, ModelFormat, ObjectId, PlacedObject, PlanRoom, RoomParameters, SceneModel, SpatialRoom, Transform2D,
    Transform3D, asset_file_name,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::access::VerifiedOwner;
use crate::document::{DesignDocument, DesignMeta, DocumentDraft};
use crate::error::DesignError;

// =============================================================================
// ENCODE
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanObjectWire<'a> {
    id: ObjectId,
    #[serde(rename = "type")]
    catalog_type: &'a str,
    image: &'a str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotate_x: f64,
    rotate_y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

#[derive(Serialize)]
struct SpatialObjectWire<'a> {
    id: ObjectId,
    name: &'a str,
    path: &'a str,
    #[serde(rename = "type")]
    format: ModelFormat,
    position: [f64; 3],
    rotation: [f64; 3],
    scale: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanDesignData<'a> {
    objects: Vec<PlanObjectWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<&'a str>,
    room_width: f64,
    room_height: f64,
    wall_color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpatialDesignData<'a> {
    objects: Vec<SpatialObjectWire<'a>>,
    room_width: f64,
    room_length: f64,
    room_height: f64,
    wall_color: &'a str,
    floor_color: &'a str,
}

/// Build a storable draft from a scene snapshot.
///
/// # Errors
///
/// - `Scene(ModeMismatch)` if `meta.kind` differs from the scene's mode.
/// - `Incomplete` if the name is blank or the scene has no objects.
/// - `InvalidAsset` if any plan-view asset is not on the sprite allow-list.
pub fn to_document(
    scene: &SceneModel,
    meta: &DesignMeta,
    owner: VerifiedOwner,
    catalog: &Catalog,
) -> Result<DocumentDraft, DesignError> {
    if meta.kind != scene.mode() {
        return Err(scene::SceneError::ModeMismatch { expected: scene.mode(), found: meta.kind }.into());
    }
    if meta.name.trim().is_empty() {
        return Err(DesignError::Incomplete("name"));
    }
    if scene.is_empty() {
        return Err(DesignError::Incomplete("objects"));
    }
    for obj in scene.objects() {
        catalog
            .check_asset(obj)
            .map_err(|_| DesignError::InvalidAsset(obj.asset_file_name().to_owned()))?;
    }

    let design_data = match scene.room() {
        RoomParameters::Plan(room) => serde_json::to_value(PlanDesignData {
            objects: scene.objects().iter().filter_map(plan_wire).collect(),
            background: room.background.as_deref(),
            room_width: room.width_ft,
            room_height: room.height_ft,
            wall_color: &room.wall_color,
        })?,
        RoomParameters::Spatial(room) => serde_json::to_value(SpatialDesignData {
            objects: scene.objects().iter().filter_map(spatial_wire).collect(),
            room_width: room.width_m,
            room_length: room.length_m,
            room_height: room.height_m,
            wall_color: &room.wall_color,
            floor_color: &room.floor_color,
        })?,
    };

    Ok(DocumentDraft {
        owner_id: owner.id(),
        name: meta.name.clone(),
        kind: meta.kind,
        is_public: meta.is_public,
        design_data,
    })
}

fn plan_wire(obj: &PlacedObject) -> Option<PlanObjectWire<'_>> {
    let t = obj.transform.as_plan()?;
    Some(PlanObjectWire {
        id: obj.id,
        catalog_type: &obj.catalog_type,
        image: &obj.asset_ref,
        x: t.x,
        y: t.y,
        width: t.width,
        height: t.height,
        rotate_x: t.rotate_x,
        rotate_y: t.rotate_y,
        color: obj.color.as_deref(),
    })
}

fn spatial_wire(obj: &PlacedObject) -> Option<SpatialObjectWire<'_>> {
    let t = obj.transform.as_spatial()?;
    Some(SpatialObjectWire {
        id: obj.id,
        name: &obj.catalog_type,
        path: &obj.asset_ref,
        format: ModelFormat::from_path(&obj.asset_ref),
        position: t.position,
        rotation: t.rotation,
        scale: t.scale,
        color: obj.color.as_deref(),
    })
}

// =============================================================================
// DECODE
// =============================================================================

/// What happened to a malformed part of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryKind {
    /// Field absent; default used.
    Missing,
    /// Field present but unusable; default used.
    Invalid,
    /// Object discarded.
    Dropped,
    /// Object id absent, invalid, or duplicated; fresh id issued.
    Reassigned,
    /// Catalog type absent; derived from the asset file name.
    Derived,
}

/// One recovered field or object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    /// JSON-path-like location, such as `objects[2].width`.
    pub location: String,
    pub kind: RecoveryKind,
}

impl fmt::Display for Recovered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            RecoveryKind::Missing => "missing, default used",
            RecoveryKind::Invalid => "invalid, default used",
            RecoveryKind::Dropped => "dropped",
            RecoveryKind::Reassigned => "id reassigned",
            RecoveryKind::Derived => "type derived from asset",
        };
        write!(f, "{}: {what}", self.location)
    }
}

/// A hydrated scene plus everything that had to be repaired on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedScene {
    pub scene: SceneModel,
    pub meta: DesignMeta,
    pub recovered: Vec<Recovered>,
}

/// Hydrate a scene from a stored document. Never fails.
#[must_use]
pub fn from_document(doc: &DesignDocument, catalog: &Catalog) -> LoadedScene {
    let mut decoder = Decoder::default();
    let mode = doc.kind;

    let empty = Map::new();
    let data = if let Some(map) = doc.design_data.as_object() {
        map
    } else {
        decoder.note("designData", RecoveryKind::Invalid);
        &empty
    };

    let room = match mode {
        Mode::Plan => RoomParameters::Plan(decoder.plan_room(data)),
        Mode::Spatial => RoomParameters::Spatial(decoder.spatial_room(data)),
    };

    let raw_objects: &[Value] = match data.get("objects") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            decoder.note("objects", RecoveryKind::Invalid);
            &[]
        }
        None => {
            decoder.note("objects", RecoveryKind::Missing);
            &[]
        }
    };

    let mut parsed = Vec::new();
    for (i, raw) in raw_objects.iter().enumerate() {
        let at = format!("objects[{i}]");
        let Some(obj) = raw.as_object() else {
            decoder.note(&at, RecoveryKind::Dropped);
            continue;
        };
        let placed = match mode {
            Mode::Plan => decoder.plan_object(obj, &at, catalog),
            Mode::Spatial => decoder.spatial_object(obj, &at, catalog),
        };
        match placed {
            Some(p) => parsed.push((at, p)),
            None => decoder.note(&at, RecoveryKind::Dropped),
        }
    }

    let objects = decoder.assign_ids(parsed);
    let mut scene = SceneModel::with_room(room);
    for (at, obj) in objects {
        if let Err(e) = scene.insert(obj) {
            warn!(design_id = %doc.id, error = %e, "object skipped during hydration");
            decoder.note(&at, RecoveryKind::Dropped);
        }
    }

    for r in &decoder.recovered {
        warn!(design_id = %doc.id, location = %r.location, kind = ?r.kind, "recovered malformed design field");
    }

    LoadedScene {
        scene,
        meta: DesignMeta { name: doc.name.clone(), kind: mode, is_public: doc.is_public },
        recovered: decoder.recovered,
    }
}

struct ParsedObject {
    id: Option<ObjectId>,
    object: PlacedObject,
}

#[derive(Default)]
struct Decoder {
    recovered: Vec<Recovered>,
}

impl Decoder {
    fn note(&mut self, location: &str, kind: RecoveryKind) {
        self.recovered.push(Recovered { location: location.to_owned(), kind });
    }

    fn number(&mut self, map: &Map<String, Value>, key: &str, at: &str, default: f64) -> f64 {
        match map.get(key) {
            None | Some(Value::Null) => {
                self.note(&join(at, key), RecoveryKind::Missing);
                default
            }
            Some(v) => as_number(v).unwrap_or_else(|| {
                self.note(&join(at, key), RecoveryKind::Invalid);
                default
            }),
        }
    }

    fn string(&mut self, map: &Map<String, Value>, key: &str, at: &str, default: &str) -> String {
        match map.get(key) {
            None | Some(Value::Null) => {
                self.note(&join(at, key), RecoveryKind::Missing);
                default.to_owned()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.note(&join(at, key), RecoveryKind::Invalid);
                default.to_owned()
            }
        }
    }

    /// Object id. Absence is normal; anything but an integer within
    /// `±MAX_OBJECT_ID` is noted and treated as absent.
    fn id(&mut self, obj: &Map<String, Value>, at: &str) -> Option<ObjectId> {
        match obj.get("id") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let id = as_id(v);
                if id.is_none() {
                    self.note(&join(at, "id"), RecoveryKind::Invalid);
                }
                id
            }
        }
    }

    /// Optional string: absence is normal, a non-string is recovered to `None`.
    fn optional_string(&mut self, map: &Map<String, Value>, key: &str, at: &str) -> Option<String> {
        match map.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.note(&join(at, key), RecoveryKind::Invalid);
                None
            }
        }
    }

    fn vector(&mut self, map: &Map<String, Value>, key: &str, at: &str, default: [f64; 3]) -> [f64; 3] {
        match map.get(key) {
            None | Some(Value::Null) => {
                self.note(&join(at, key), RecoveryKind::Missing);
                default
            }
            Some(v) => as_vector(v).unwrap_or_else(|| {
                self.note(&join(at, key), RecoveryKind::Invalid);
                default
            }),
        }
    }

    fn plan_room(&mut self, data: &Map<String, Value>) -> PlanRoom {
        let d = PlanRoom::default();
        PlanRoom {
            width_ft: self.number(data, "roomWidth", "", d.width_ft),
            height_ft: self.number(data, "roomHeight", "", d.height_ft),
            background: self.optional_string(data, "background", ""),
            wall_color: self.string(data, "wallColor", "", &d.wall_color),
        }
    }

    fn spatial_room(&mut self, data: &Map<String, Value>) -> SpatialRoom {
        let d = SpatialRoom::default();
        SpatialRoom {
            width_m: self.number(data, "roomWidth", "", d.width_m),
            length_m: self.number(data, "roomLength", "", d.length_m),
            height_m: self.number(data, "roomHeight", "", d.height_m),
            wall_color: self.string(data, "wallColor", "", &d.wall_color),
            floor_color: self.string(data, "floorColor", "", &d.floor_color),
        }
    }

    /// Resolve catalog type and asset reference, deriving whichever is missing.
    fn identity(
        &mut self,
        catalog_type: Option<String>,
        asset_ref: Option<String>,
        at: &str,
        mode: Mode,
        catalog: &Catalog,
    ) -> Option<(String, String)> {
        match (catalog_type, asset_ref) {
            (Some(t), Some(a)) => Some((t, a)),
            (None, Some(a)) => {
                self.note(&join(at, "type"), RecoveryKind::Derived);
                Some((file_stem(&a).to_owned(), a))
            }
            (Some(t), None) => {
                let entry = catalog.lookup(mode, &t).ok()?;
                self.note(&join(at, "asset"), RecoveryKind::Missing);
                Some((t, entry.asset_ref.to_owned()))
            }
            (None, None) => None,
        }
    }

    fn plan_object(&mut self, obj: &Map<String, Value>, at: &str, catalog: &Catalog) -> Option<ParsedObject> {
        let catalog_type = non_empty_str(obj, "type");
        let asset_ref = non_empty_str(obj, "image").or_else(|| non_empty_str(obj, "path"));
        let (catalog_type, asset_ref) = self.identity(catalog_type, asset_ref, at, Mode::Plan, catalog)?;

        let transform = Transform2D {
            x: self.number(obj, "x", at, 0.0),
            y: self.number(obj, "y", at, 0.0),
            width: self.number(obj, "width", at, DEFAULT_SIZE_2D),
            height: self.number(obj, "height", at, DEFAULT_SIZE_2D),
            rotate_x: self.number(obj, "rotateX", at, 0.0),
            rotate_y: self.number(obj, "rotateY", at, 0.0),
        };
        let mut object = PlacedObject::plan(0, &catalog_type, &asset_ref, transform);
        object.color = self.optional_string(obj, "color", at);
        Some(ParsedObject { id: self.id(obj, at), object })
    }

    fn spatial_object(&mut self, obj: &Map<String, Value>, at: &str, catalog: &Catalog) -> Option<ParsedObject> {
        let catalog_type = non_empty_str(obj, "name");
        let asset_ref = non_empty_str(obj, "path");
        let (catalog_type, asset_ref) = self.identity(catalog_type, asset_ref, at, Mode::Spatial, catalog)?;

        let mut transform = Transform3D {
            position: self.vector(obj, "position", at, [0.0; 3]),
            rotation: self.vector(obj, "rotation", at, [0.0; 3]),
            scale: self.vector(obj, "scale", at, [DEFAULT_SCALE_3D; 3]),
        };
        transform.clamp_scale();
        let color = self.optional_string(obj, "color", at);
        let object = PlacedObject::spatial(0, &catalog_type, &asset_ref, transform, color);
        Some(ParsedObject { id: self.id(obj, at), object })
    }

    /// Keep the first occurrence of each valid id; issue fresh ids past the
    /// largest kept one for the rest. Objects left without an id once the
    /// clock runs out are dropped.
    fn assign_ids(&mut self, parsed: Vec<(String, ParsedObject)>) -> Vec<(String, PlacedObject)> {
        let mut seen = HashSet::new();
        let mut clock = IdClock::new();
        let keep: Vec<bool> = parsed
            .iter()
            .map(|(_, p)| p.id.is_some_and(|id| seen.insert(id)))
            .collect();
        if let Some(max) = seen.iter().max() {
            clock.observe(*max);
        }

        parsed
            .into_iter()
            .zip(keep)
            .filter_map(|((at, p), kept)| {
                let mut object = p.object;
                match p.id {
                    Some(id) if kept => object.id = id,
                    _ => match clock.next() {
                        Ok(id) => {
                            self.note(&join(&at, "id"), RecoveryKind::Reassigned);
                            object.id = id;
                        }
                        Err(e) => {
                            warn!(location = %at, error = %e, "no id left for object");
                            self.note(&at, RecoveryKind::Dropped);
                            return None;
                        }
                    },
                }
                Some((at, object))
            })
            .collect()
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() { key.to_owned() } else { format!("{at}.{key}") }
}

fn non_empty_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

/// `[x, y, z]`, `{x, y, z}`, or a single number applied to every axis.
fn as_vector(v: &Value) -> Option<[f64; 3]> {
    match v {
        Value::Array(items) if items.len() == 3 => {
            Some([as_number(&items[0])?, as_number(&items[1])?, as_number(&items[2])?])
        }
        Value::Object(map) => Some([
            as_number(map.get("x")?)?,
            as_number(map.get("y")?)?,
            as_number(map.get("z")?)?,
        ]),
        other => as_number(other).map(|n| [n; 3]),
    }
}

/// An integral id no larger in magnitude than [`MAX_OBJECT_ID`].
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_id(v: &Value) -> Option<ObjectId> {
    let id = match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_OBJECT_ID as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id: &i64| id.unsigned_abs() <= MAX_OBJECT_ID.unsigned_abs())
}

/// File name without its extension.
fn file_stem(asset_ref: &str) -> &str {
    let name = asset_file_name(asset_ref);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}
