//! Closed furniture catalog.
//!
//! Every placed object is created from a catalog entry. Plan view offers
//! raster sprites; scene view offers GLB models. The sprite allow-list used
//! when a design is serialized is derived from the plan entries' image file
//! names, so the two can never drift apart. Every plan-view object is checked
//! against it regardless of extension; scene-view model paths are exempt.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::doc::{Mode, PlacedObject, Transform, asset_file_name};
use crate::error::SceneError;

/// One item a user can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Key stored on placed objects (`"chair1blue"`, `"Sofa"`).
    pub catalog_type: &'static str,
    /// Display name for pickers.
    pub label: &'static str,
    /// Image path (plan) or model path (scene).
    pub asset_ref: &'static str,
    pub mode: Mode,
}

const fn plan(catalog_type: &'static str, label: &'static str, asset_ref: &'static str) -> CatalogEntry {
    CatalogEntry { catalog_type, label, asset_ref, mode: Mode::Plan }
}

const fn model(catalog_type: &'static str, label: &'static str, asset_ref: &'static str) -> CatalogEntry {
    CatalogEntry { catalog_type, label, asset_ref, mode: Mode::Spatial }
}

const FURNITURE: &[CatalogEntry] = &[
    plan("bed1blue", "Bed 1 Blue", "/src/assets/2d/Bed/bed1blue.png"),
    plan("bed1red", "Bed 1 Red", "/src/assets/2d/Bed/bed1red.png"),
    plan("bed1white", "Bed 1 White", "/src/assets/2d/Bed/bed1white.png"),
    plan("bed2blue", "Bed 2 Blue", "/src/assets/2d/Bed/bed2blue.png"),
    plan("bed2red", "Bed 2 Red", "/src/assets/2d/Bed/bed2red.png"),
    plan("bed2white", "Bed 2 White", "/src/assets/2d/Bed/bed2white.png"),
    plan("chair1blue", "Chair 1 Blue", "/src/assets/2d/Chair/chair1blue.png"),
    plan("chair1brown", "Chair 1 Brown", "/src/assets/2d/Chair/chair1brown.png"),
    plan("chair1red", "Chair 1 Red", "/src/assets/2d/Chair/chair1red.png"),
    plan("chair1white", "Chair 1 White", "/src/assets/2d/Chair/chair1white.png"),
    plan("sofa1blue", "Sofa 1 Blue", "/src/assets/2d/Sofa/Sofa 1/sofa1blue.png"),
    plan("sofa1brown", "Sofa 1 Brown", "/src/assets/2d/Sofa/Sofa 1/sofa1brown.png"),
    plan("sofa1white", "Sofa 1 White", "/src/assets/2d/Sofa/Sofa 1/sofa1white.png"),
    plan("sofa2blue", "Sofa 2 Blue", "/src/assets/2d/Sofa/Sofa 2/sofa2blue.png"),
    plan("sofa2brown", "Sofa 2 Brown", "/src/assets/2d/Sofa/Sofa 2/sofa2brown.png"),
    plan("sofa2gray", "Sofa 2 Gray", "/src/assets/2d/Sofa/Sofa 2/sofa2gray.png"),
    plan("sofa2green", "Sofa 2 Green", "/src/assets/2d/Sofa/Sofa 2/sofa2green.png"),
    plan("tablebl", "Table Blue", "/src/assets/2d/Table/table1bl.png"),
    plan("tablebr", "Table Brown", "/src/assets/2d/Table/table1br.png"),
    plan("tablew", "Table White", "/src/assets/2d/Table/table1w.png"),
    model("Bookrack", "Bookrack", "/models/Bookrack.glb"),
    model("Chair1", "Chair 1", "/models/Chair1.glb"),
    model("Chair2", "Chair 2", "/models/Chair2.glb"),
    model("Coffeetable", "Coffee Table", "/models/coffeetable.glb"),
    model("GamingChair", "Gaming Chair", "/models/gamingchair.glb"),
    model("Rack2", "Rack 2", "/models/rack2.glb"),
    model("Couch", "Couch", "/models/couch02.glb"),
    model("Sofa", "Sofa", "/models/sofa1.glb"),
    model("Sofa2", "Sofa 2", "/models/soffaaaa.glb"),
];

/// The set of placeable items, keyed by mode and catalog type.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::furniture()
    }
}

impl Catalog {
    /// The built-in furniture catalog.
    #[must_use]
    pub fn furniture() -> Self {
        Self { entries: FURNITURE }
    }

    /// Find the entry for `catalog_type` in `mode`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAsset` if no entry of that mode has the type.
    pub fn lookup(&self, mode: Mode, catalog_type: &str) -> Result<&'static CatalogEntry, SceneError> {
        self.entries
            .iter()
            .find(|e| e.mode == mode && e.catalog_type == catalog_type)
            .ok_or_else(|| SceneError::UnknownAsset(catalog_type.to_owned()))
    }

    /// Entries available in `mode`, in picker order.
    pub fn entries(&self, mode: Mode) -> impl Iterator<Item = &'static CatalogEntry> {
        self.entries.iter().filter(move |e| e.mode == mode)
    }

    /// Whether `file_name` is one of the plan-view sprite files. Case is ignored.
    #[must_use]
    pub fn allows_sprite(&self, file_name: &str) -> bool {
        self.entries(Mode::Plan)
            .any(|e| asset_file_name(e.asset_ref).eq_ignore_ascii_case(file_name))
    }

    /// Re-validate an object's asset against the sprite allow-list.
    ///
    /// Plan-view objects must name a catalog sprite file, whatever their
    /// extension. Scene-view model paths pass through.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAsset` with the offending file name.
    pub fn check_asset(&self, obj: &PlacedObject) -> Result<(), SceneError> {
        match obj.transform {
            Transform::Spatial(_) => Ok(()),
            Transform::Plan(_) if self.allows_sprite(obj.asset_file_name()) => Ok(()),
            Transform::Plan(_) => Err(SceneError::UnknownAsset(obj.asset_file_name().to_owned())),
        }
    }
}
