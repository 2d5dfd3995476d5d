//! Editing sessions and their save lifecycle.
//!
//! DESIGN
//! ======
//! A `DesignSession` owns the engine for one open design, the editable
//! metadata, and the id of the stored document it came from (if any).
//!
//! Saving is split in three so the async write never holds the session:
//!
//! 1. `prepare_save` snapshots scene and metadata into a `PendingSave`.
//! 2. `PendingSave::commit` performs the write through the access boundary.
//! 3. `finish_save` records the stored document's identity on the session.
//!
//! Edits made between 1 and 3 stay in the session and are never replaced by
//! the snapshot. If 2 fails, 3 is never called and the session is unchanged.
//!
//! `Create` is only valid for a session with no source. A design opened from
//! the store is written back with `UpdateInPlace` or copied with `SaveAsNew`.
//! A document file that should become a new design goes through `import`.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use scene::catalog::Catalog;
use scene::doc::{Mode, SceneModel};
use scene::engine::EngineCore;
use tracing::info;
use uuid::Uuid;

use crate::access::AccessBoundary;
use crate::adapter::{self, Recovered};
use crate::config::Config;
use crate::document::{DesignDocument, DesignMeta};
use crate::error::DesignError;

/// How a save relates to the stored document the session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIntent {
    /// Store a never-saved session as a new document.
    Create,
    /// Overwrite the source document. Owner only.
    UpdateInPlace,
    /// Store a copy under the current identity with a decorated name.
    SaveAsNew,
}

impl SaveIntent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::UpdateInPlace => "update",
            Self::SaveAsNew => "save_as_new",
        }
    }
}

/// One open design.
#[derive(Debug, Clone)]
pub struct DesignSession {
    engine: EngineCore,
    meta: DesignMeta,
    source: Option<Uuid>,
    save_as_new_suffix: String,
}

impl DesignSession {
    /// A new, never-saved design.
    #[must_use]
    pub fn new(name: &str, mode: Mode, config: &Config) -> Self {
        Self {
            engine: EngineCore::new(mode),
            meta: DesignMeta::new(name, mode),
            source: None,
            save_as_new_suffix: config.save_as_new_suffix.clone(),
        }
    }

    /// Open a stored design for editing. Saves write back to `doc`.
    /// Malformed parts are repaired and returned.
    #[must_use]
    pub fn open(doc: &DesignDocument, config: &Config) -> (Self, Vec<Recovered>) {
        Self::hydrate(doc, config, Some(doc.id))
    }

    /// Load a document as a never-saved design, ready for `Create`.
    #[must_use]
    pub fn import(doc: &DesignDocument, config: &Config) -> (Self, Vec<Recovered>) {
        Self::hydrate(doc, config, None)
    }

    fn hydrate(doc: &DesignDocument, config: &Config, source: Option<Uuid>) -> (Self, Vec<Recovered>) {
        let loaded = adapter::from_document(doc, &Catalog::furniture());
        info!(
            design_id = %doc.id,
            objects = loaded.scene.len(),
            recovered = loaded.recovered.len(),
            attached = source.is_some(),
            "design opened"
        );
        let session = Self {
            engine: EngineCore::from_scene(loaded.scene),
            meta: loaded.meta,
            source,
            save_as_new_suffix: config.save_as_new_suffix.clone(),
        };
        (session, loaded.recovered)
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// The engine, for forwarding user input.
    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn meta(&self) -> &DesignMeta {
        &self.meta
    }

    pub fn rename(&mut self, name: &str) {
        name.clone_into(&mut self.meta.name);
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.meta.is_public = is_public;
    }

    /// Id of the stored document this session writes back to.
    #[must_use]
    pub fn source(&self) -> Option<Uuid> {
        self.source
    }

    /// Snapshot the design for saving.
    ///
    /// # Errors
    ///
    /// - `NotPersisted` for `UpdateInPlace` when the session has no source.
    /// - `AlreadyPersisted` for `Create` when it has one.
    pub fn prepare_save(&self, intent: SaveIntent) -> Result<PendingSave, DesignError> {
        check_intent(intent, self.source)?;
        Ok(PendingSave {
            intent,
            scene: self.engine.snapshot(),
            meta: self.meta.clone(),
            source: self.source,
            suffix: self.save_as_new_suffix.clone(),
        })
    }

    /// Record where a committed save landed. The scene is left alone.
    ///
    /// The session name follows the stored one (for example a decorated
    /// save-as-new name) unless it was edited while the save was in flight.
    pub fn finish_save(&mut self, saved: &SavedDesign) {
        self.source = Some(saved.document.id);
        if self.meta.name == saved.snapshot_name {
            self.meta.name.clone_from(&saved.document.name);
        }
    }

    /// Prepare, commit and finish in one call.
    ///
    /// # Errors
    ///
    /// Any error from `prepare_save` or `PendingSave::commit`.
    pub async fn save(&mut self, intent: SaveIntent, boundary: &AccessBoundary) -> Result<DesignDocument, DesignError> {
        let saved = self.prepare_save(intent)?.commit(boundary).await?;
        self.finish_save(&saved);
        Ok(saved.document)
    }
}

/// A save captured at `prepare_save` time, not yet written.
#[derive(Debug, Clone)]
pub struct PendingSave {
    intent: SaveIntent,
    scene: SceneModel,
    meta: DesignMeta,
    source: Option<Uuid>,
    suffix: String,
}

/// Result of a committed save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDesign {
    pub document: DesignDocument,
    /// Session name at snapshot time.
    pub snapshot_name: String,
}

impl PendingSave {
    #[must_use]
    pub fn intent(&self) -> SaveIntent {
        self.intent
    }

    #[must_use]
    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// Write the snapshot.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when nobody is signed in.
    /// - `Incomplete` or `InvalidAsset` from encoding.
    /// - `NotFound` or `Forbidden` when updating in place.
    /// - `NotPersisted` or `AlreadyPersisted` when the intent does not fit the
    ///   source.
    pub async fn commit(self, boundary: &AccessBoundary) -> Result<SavedDesign, DesignError> {
        let owner = boundary.identify()?;
        let catalog = Catalog::furniture();
        let snapshot_name = self.meta.name.clone();

        let document = match (self.intent, self.source) {
            (SaveIntent::UpdateInPlace, Some(id)) => {
                let draft = adapter::to_document(&self.scene, &self.meta, owner, &catalog)?;
                boundary.update(id, draft).await?
            }
            (SaveIntent::UpdateInPlace, None) => return Err(DesignError::NotPersisted),
            (SaveIntent::SaveAsNew, _) => {
                if self.meta.name.trim().is_empty() {
                    return Err(DesignError::Incomplete("name"));
                }
                let meta = DesignMeta { name: format!("{}{}", self.meta.name, self.suffix), ..self.meta };
                let draft = adapter::to_document(&self.scene, &meta, owner, &catalog)?;
                boundary.create(draft).await?
            }
            (SaveIntent::Create, Some(id)) => return Err(DesignError::AlreadyPersisted(id)),
            (SaveIntent::Create, None) => {
                let draft = adapter::to_document(&self.scene, &self.meta, owner, &catalog)?;
                boundary.create(draft).await?
            }
        };

        info!(
            design_id = %document.id,
            intent = self.intent.as_str(),
            source = ?self.source,
            objects = self.scene.len(),
            "design saved"
        );
        Ok(SavedDesign { document, snapshot_name })
    }
}

fn check_intent(intent: SaveIntent, source: Option<Uuid>) -> Result<(), DesignError> {
    match (intent, source) {
        (SaveIntent::UpdateInPlace, None) => Err(DesignError::NotPersisted),
        (SaveIntent::Create, Some(id)) => Err(DesignError::AlreadyPersisted(id)),
        _ => Ok(()),
    }
}
