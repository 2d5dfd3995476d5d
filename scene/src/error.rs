//! Errors raised by scene mutations.

use crate::doc::{Mode, ObjectId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown asset: {0}")]
    UnknownAsset(String),
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("duplicate object id: {0}")]
    DuplicateId(ObjectId),
    #[error("mode mismatch: scene is {expected}, got {found}")]
    ModeMismatch { expected: Mode, found: Mode },
    #[error("unknown field for {mode} scene: {field}")]
    UnknownField { mode: Mode, field: String },
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("object ids exhausted after {0}")]
    IdsExhausted(ObjectId),
}

impl SceneError {
    /// Stable, grepable code for logs and host-facing error payloads.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAsset(_) => "E_UNKNOWN_ASSET",
            Self::ObjectNotFound(_) => "E_OBJECT_NOT_FOUND",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::ModeMismatch { .. } => "E_MODE_MISMATCH",
            Self::UnknownField { .. } => "E_UNKNOWN_FIELD",
            Self::UnknownMode(_) => "E_UNKNOWN_MODE",
            Self::IdsExhausted(_) => "E_IDS_EXHAUSTED",
        }
    }
}
