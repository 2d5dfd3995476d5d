//! Persisted design documents.
//!
//! A `DesignDocument` is what the store holds: ownership and visibility
//! metadata plus an opaque `designData` JSON payload produced by the
//! adapter. Field names on the wire are camelCase (`ownerId`, `isPublic`,
//! `designData`, `createdAt`), with the mode under `type`.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use scene::doc::Mode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// User-editable metadata of a design in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignMeta {
    pub name: String,
    pub kind: Mode,
    pub is_public: bool,
}

impl DesignMeta {
    #[must_use]
    pub fn new(name: &str, kind: Mode) -> Self {
        Self { name: name.to_owned(), kind, is_public: false }
    }
}

/// A stored design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub owner_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Mode,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub design_data: Value,
    #[serde(default)]
    pub created_at: i64,
}

impl DesignDocument {
    /// Materialize a draft under a freshly assigned id.
    #[must_use]
    pub fn from_draft(id: Uuid, draft: DocumentDraft, created_at: i64) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            name: draft.name,
            kind: draft.kind,
            is_public: draft.is_public,
            design_data: draft.design_data,
            created_at,
        }
    }
}

/// A document ready to be written, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub owner_id: Uuid,
    pub name: String,
    pub kind: Mode,
    pub is_public: bool,
    pub design_data: Value,
}

/// Partial update of a stored document. `None` fields are left as they are.
///
/// Ownership and creation time are never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub kind: Option<Mode>,
    pub is_public: Option<bool>,
    pub design_data: Option<Value>,
}

impl DocumentPatch {
    /// Patch that overwrites everything a draft carries except its owner.
    #[must_use]
    pub fn from_draft(draft: DocumentDraft) -> Self {
        Self {
            name: Some(draft.name),
            kind: Some(draft.kind),
            is_public: Some(draft.is_public),
            design_data: Some(draft.design_data),
        }
    }

    /// Patch that only flips visibility.
    #[must_use]
    pub fn visibility(is_public: bool) -> Self {
        Self { is_public: Some(is_public), ..Self::default() }
    }

    pub fn apply(self, doc: &mut DesignDocument) {
        if let Some(name) = self.name {
            doc.name = name;
        }
        if let Some(kind) = self.kind {
            doc.kind = kind;
        }
        if let Some(is_public) = self.is_public {
            doc.is_public = is_public;
        }
        if let Some(design_data) = self.design_data {
            doc.design_data = design_data;
        }
    }
}
