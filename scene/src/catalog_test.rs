use super::*;
use crate::doc::{Transform2D, Transform3D};

fn sprite(asset_ref: &str) -> PlacedObject {
    PlacedObject::plan(1, "sprite", asset_ref, Transform2D::default())
}

#[test]
fn plan_catalog_has_twenty_sprites() {
    let catalog = Catalog::furniture();
    assert_eq!(catalog.entries(Mode::Plan).count(), 20);
    assert!(catalog.entries(Mode::Plan).all(|e| e.asset_ref.ends_with(".png")));
}

#[test]
fn spatial_catalog_has_nine_models() {
    let catalog = Catalog::furniture();
    assert_eq!(catalog.entries(Mode::Spatial).count(), 9);
    assert!(catalog.entries(Mode::Spatial).all(|e| e.asset_ref.ends_with(".glb")));
}

#[test]
fn lookup_is_per_mode() {
    let catalog = Catalog::default();
    let chair = catalog.lookup(Mode::Plan, "chair1blue").unwrap();
    assert_eq!(chair.asset_ref, "/src/assets/2d/Chair/chair1blue.png");
    assert_eq!(chair.label, "Chair 1 Blue");

    let couch = catalog.lookup(Mode::Spatial, "Couch").unwrap();
    assert_eq!(couch.asset_ref, "/models/couch02.glb");

    assert_eq!(
        catalog.lookup(Mode::Spatial, "chair1blue"),
        Err(SceneError::UnknownAsset("chair1blue".into()))
    );
    assert!(catalog.lookup(Mode::Plan, "Couch").is_err());
}

#[test]
fn table_types_map_to_table1_files() {
    let catalog = Catalog::furniture();
    let table = catalog.lookup(Mode::Plan, "tablebl").unwrap();
    assert_eq!(asset_file_name(table.asset_ref), "table1bl.png");
    assert!(catalog.allows_sprite("table1bl.png"));
    assert!(!catalog.allows_sprite("tablebl.png"));
}

#[test]
fn plan_objects_are_checked_whatever_the_extension() {
    let catalog = Catalog::furniture();
    assert!(catalog.check_asset(&sprite("/src/assets/2d/Sofa/Sofa 2/sofa2gray.png")).is_ok());
    assert_eq!(
        catalog.check_asset(&sprite("/uploads/evil.png")),
        Err(SceneError::UnknownAsset("evil.png".into()))
    );
    assert_eq!(
        catalog.check_asset(&sprite("/uploads/evil.jpg")),
        Err(SceneError::UnknownAsset("evil.jpg".into()))
    );
    assert_eq!(
        catalog.check_asset(&sprite("/uploads/EVIL.PNG")),
        Err(SceneError::UnknownAsset("EVIL.PNG".into()))
    );
    assert!(catalog.check_asset(&sprite("no-extension")).is_err());
}

#[test]
fn sprite_names_match_without_case() {
    let catalog = Catalog::furniture();
    assert!(catalog.allows_sprite("CHAIR1BLUE.PNG"));
    assert!(catalog.check_asset(&sprite("/assets/Chair1Red.png")).is_ok());
}

#[test]
fn model_paths_are_exempt() {
    let catalog = Catalog::furniture();
    let model = PlacedObject::spatial(2, "Lamp", "/models/custom/lamp.obj", Transform3D::default(), None);
    assert!(catalog.check_asset(&model).is_ok());
}

#[test]
fn sprite_check_uses_file_name_not_directory() {
    let catalog = Catalog::furniture();
    assert!(catalog.check_asset(&sprite("/elsewhere/chair1red.png")).is_ok());
}
