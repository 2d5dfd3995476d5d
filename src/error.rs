//! Error types shared across the persistence and access layers.
//!
//! Every error exposes a stable code through [`ErrorCode`] so hosts can
//! branch on it and logs can be grepped for it.

use scene::SceneError;
use uuid::Uuid;

use crate::store::StoreError;

/// Stable, grepable error code.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl ErrorCode for SceneError {
    fn error_code(&self) -> &'static str {
        SceneError::error_code(self)
    }
}

/// Failure of a design-level operation (save, load, list, delete, toggle).
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
    #[error("no signed-in user")]
    Unauthenticated,
    #[error("not the owner of this design")]
    Forbidden,
    #[error("design not found: {0}")]
    NotFound(Uuid),
    #[error("design has not been saved yet")]
    NotPersisted,
    #[error("design is already stored as {0}; update it or save as new")]
    AlreadyPersisted(Uuid),
    #[error("design incomplete: {0}")]
    Incomplete(&'static str),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Store(StoreError),
    #[error("design data encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for DesignError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl ErrorCode for DesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAsset(_) => "E_INVALID_ASSET",
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::Forbidden => "E_FORBIDDEN",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::NotPersisted => "E_NOT_PERSISTED",
            Self::AlreadyPersisted(_) => "E_ALREADY_PERSISTED",
            Self::Incomplete(_) => "E_INCOMPLETE",
            Self::Scene(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Encode(_) => "E_ENCODE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.retryable(),
            _ => false,
        }
    }
}
