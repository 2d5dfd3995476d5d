//! Design storage backends.
//!
//! DESIGN
//! ======
//! `DesignStore` is the raw CRUD seam under the access boundary. It performs
//! no ownership checks; `AccessBoundary` decides who may call what. Two
//! backends exist: `MemoryDesignStore` for tests and offline use, and
//! `PgDesignStore` over the `designs` table. Updates are last-write-wins.

pub mod memory;
pub mod postgres;

use uuid::Uuid;

use crate::document::{DesignDocument, DocumentDraft, DocumentPatch};
use crate::error::ErrorCode;

pub use memory::MemoryDesignStore;
pub use postgres::PgDesignStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("design not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::Database(_) => "E_DATABASE",
            Self::Decode(_) => "E_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Which documents a listing returns. Results are newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListQuery {
    /// Every document owned by the user.
    Owner(Uuid),
    /// Every public document, regardless of owner.
    Public,
    /// The user's own private documents.
    Private(Uuid),
}

impl ListQuery {
    /// Whether `doc` belongs in this listing.
    #[must_use]
    pub fn matches(&self, doc: &DesignDocument) -> bool {
        match self {
            Self::Owner(owner) => doc.owner_id == *owner,
            Self::Public => doc.is_public,
            Self::Private(owner) => doc.owner_id == *owner && !doc.is_public,
        }
    }
}

#[async_trait::async_trait]
pub trait DesignStore: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<DesignDocument, StoreError>;

    async fn list(&self, query: ListQuery) -> Result<Vec<DesignDocument>, StoreError>;

    /// Store a new document under a fresh id.
    async fn insert(&self, draft: DocumentDraft) -> Result<DesignDocument, StoreError>;

    async fn update(&self, id: Uuid, patch: DocumentPatch) -> Result<DesignDocument, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn set_visibility(&self, id: Uuid, is_public: bool) -> Result<DesignDocument, StoreError> {
        self.update(id, DocumentPatch::visibility(is_public)).await
    }
}
