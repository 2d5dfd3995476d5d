#![allow(clippy::float_cmp)]

use super::*;

fn chair(id: ObjectId, x: f64, y: f64) -> PlacedObject {
    PlacedObject::plan(
        id,
        "chair1blue",
        "/src/assets/2d/Chair/chair1blue.png",
        Transform2D { x, y, ..Transform2D::default() },
    )
}

fn sofa(id: ObjectId) -> PlacedObject {
    PlacedObject::spatial(id, "Sofa", "/models/sofa1.glb", Transform3D::default(), Some("#ffffff".into()))
}

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_wire_names() {
    assert_eq!(Mode::Plan.as_str(), "2D");
    assert_eq!(Mode::Spatial.to_string(), "3D");
    assert_eq!(serde_json::to_string(&Mode::Spatial).unwrap(), "\"3D\"");
}

#[test]
fn mode_from_str_accepts_either_case() {
    assert_eq!("2D".parse::<Mode>().unwrap(), Mode::Plan);
    assert_eq!("3d".parse::<Mode>().unwrap(), Mode::Spatial);
    assert_eq!("4D".parse::<Mode>(), Err(SceneError::UnknownMode("4D".into())));
}

// =============================================================
// Transforms
// =============================================================

#[test]
fn transform2d_defaults_to_forty_square() {
    let t = Transform2D::default();
    assert_eq!((t.x, t.y, t.width, t.height), (0.0, 0.0, 40.0, 40.0));
    assert_eq!((t.rotate_x, t.rotate_y), (0.0, 0.0));
}

#[test]
fn transform2d_contains_is_inclusive() {
    let t = Transform2D { x: 20.0, y: 20.0, ..Transform2D::default() };
    assert!(t.contains(20.0, 20.0));
    assert!(t.contains(60.0, 60.0));
    assert!(t.contains(35.0, 41.0));
    assert!(!t.contains(61.0, 30.0));
    assert!(!t.contains(30.0, 19.0));
}

#[test]
fn transform3d_defaults_to_half_scale() {
    let t = Transform3D::default();
    assert_eq!(t.position, [0.0; 3]);
    assert_eq!(t.rotation, [0.0; 3]);
    assert_eq!(t.scale, [0.5; 3]);
}

#[test]
fn clamp_scale_raises_small_components_only() {
    let mut t = Transform3D { scale: [0.0, 0.05, 2.0], ..Transform3D::default() };
    t.clamp_scale();
    assert_eq!(t.scale, [0.1, 0.1, 2.0]);
}

#[test]
fn transform3d_finiteness() {
    let mut t = Transform3D::default();
    assert!(t.is_finite());
    t.rotation[1] = f64::NAN;
    assert!(!t.is_finite());
}

#[test]
fn transform_accessors_follow_variant() {
    let plan = Transform::Plan(Transform2D::default());
    assert_eq!(plan.mode(), Mode::Plan);
    assert!(plan.as_plan().is_some());
    assert!(plan.as_spatial().is_none());

    let spatial = Transform::Spatial(Transform3D::default());
    assert_eq!(spatial.mode(), Mode::Spatial);
    assert!(spatial.as_spatial().is_some());
}

// =============================================================
// PlacedObject
// =============================================================

#[test]
fn asset_file_name_takes_last_segment() {
    assert_eq!(chair(1, 0.0, 0.0).asset_file_name(), "chair1blue.png");
    assert_eq!(asset_file_name("/src/assets/2d/Sofa/Sofa 1/sofa1white.png"), "sofa1white.png");
    assert_eq!(asset_file_name("plain.png"), "plain.png");
    assert_eq!(asset_file_name(""), "");
}

#[test]
fn model_format_only_for_spatial_objects() {
    assert_eq!(chair(1, 0.0, 0.0).model_format(), None);
    assert_eq!(sofa(2).model_format(), Some(ModelFormat::Glb));
    assert_eq!(ModelFormat::from_path("/models/Table.OBJ"), ModelFormat::Obj);
    assert_eq!(ModelFormat::from_path("/models/x.GLB"), ModelFormat::Glb);
    assert_eq!(ModelFormat::Glb.as_str(), "glb");
}

// =============================================================
// RoomParameters
// =============================================================

#[test]
fn plan_room_defaults() {
    let RoomParameters::Plan(room) = RoomParameters::default_for(Mode::Plan) else {
        panic!("expected plan room");
    };
    assert_eq!((room.width_ft, room.height_ft), (30.0, 20.0));
    assert_eq!(room.wall_color, "#ffffff");
    assert_eq!(room.background, None);
}

#[test]
fn spatial_room_defaults() {
    let RoomParameters::Spatial(room) = RoomParameters::default_for(Mode::Spatial) else {
        panic!("expected spatial room");
    };
    assert_eq!((room.width_m, room.length_m, room.height_m), (8.0, 8.0, 3.0));
    assert_eq!(room.wall_color, "#f5f5f5");
    assert_eq!(room.floor_color, "#e0cda9");
}

// =============================================================
// SceneModel
// =============================================================

#[test]
fn new_scene_is_empty_with_default_room() {
    let scene = SceneModel::new(Mode::Spatial);
    assert!(scene.is_empty());
    assert_eq!(scene.mode(), Mode::Spatial);
    assert_eq!(scene.room(), &RoomParameters::default_for(Mode::Spatial));
    assert_eq!(scene.max_id(), None);
}

#[test]
fn insert_keeps_render_order() {
    let mut scene = SceneModel::new(Mode::Plan);
    scene.insert(chair(3, 0.0, 0.0)).unwrap();
    scene.insert(chair(1, 20.0, 0.0)).unwrap();
    scene.insert(chair(2, 40.0, 0.0)).unwrap();
    let ids: Vec<_> = scene.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(scene.max_id(), Some(3));
    assert_eq!(scene.len(), 3);
}

#[test]
fn insert_rejects_duplicate_id() {
    let mut scene = SceneModel::new(Mode::Plan);
    scene.insert(chair(7, 0.0, 0.0)).unwrap();
    assert_eq!(scene.insert(chair(7, 20.0, 20.0)), Err(SceneError::DuplicateId(7)));
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.get(7).unwrap().transform.as_plan().unwrap().x, 0.0);
}

#[test]
fn insert_rejects_other_mode() {
    let mut scene = SceneModel::new(Mode::Plan);
    assert_eq!(
        scene.insert(sofa(1)),
        Err(SceneError::ModeMismatch { expected: Mode::Plan, found: Mode::Spatial })
    );
    assert!(scene.is_empty());
}

#[test]
fn remove_returns_object_and_preserves_order() {
    let mut scene = SceneModel::new(Mode::Plan);
    for id in 1..=3 {
        scene.insert(chair(id, 0.0, 0.0)).unwrap();
    }
    let removed = scene.remove(2).unwrap();
    assert_eq!(removed.id, 2);
    assert!(!scene.contains(2));
    let ids: Vec<_> = scene.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(scene.remove(2).is_none());
}

#[test]
fn from_parts_checks_invariants() {
    let room = RoomParameters::default_for(Mode::Plan);
    let scene = SceneModel::from_parts(room.clone(), vec![chair(1, 0.0, 0.0), chair(2, 20.0, 0.0)]).unwrap();
    assert_eq!(scene.len(), 2);

    let dup = SceneModel::from_parts(room, vec![chair(1, 0.0, 0.0), chair(1, 20.0, 0.0)]);
    assert_eq!(dup, Err(SceneError::DuplicateId(1)));
}

#[test]
fn with_room_takes_mode_from_room() {
    let scene = SceneModel::with_room(RoomParameters::default_for(Mode::Spatial));
    assert_eq!(scene.mode(), Mode::Spatial);
}
