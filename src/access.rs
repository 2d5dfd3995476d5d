//! Access boundary: identity and ownership checks in front of the store.
//!
//! DESIGN
//! ======
//! The signed-in identity is an explicit value (`IdentitySlot`) shared by
//! `Arc`, not ambient state. `AccessBoundary` is the only path from the rest
//! of the crate to a `DesignStore`; every write resolves the current identity
//! and compares it with the stored owner before touching anything. A
//! `VerifiedOwner` can only be minted here, so documents can only be drafted
//! for an identity that has been checked.
//!
//! Reads follow visibility: public designs are readable by anyone, private
//! ones only by their owner.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{DesignDocument, DocumentDraft, DocumentPatch};
use crate::error::DesignError;
use crate::store::{DesignStore, ListQuery};

// =============================================================================
// IDENTITY
// =============================================================================

/// Source of the current user's id.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self) -> Option<Uuid>;
}

/// Holder of the single signed-in identity.
#[derive(Debug, Default)]
pub struct IdentitySlot {
    current: RwLock<Option<Uuid>>,
}

impl IdentitySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user_id: Uuid) -> Self {
        Self { current: RwLock::new(Some(user_id)) }
    }

    pub fn sign_in(&self, user_id: Uuid) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id);
        info!(%user_id, "signed in");
    }

    pub fn sign_out(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl IdentityProvider for IdentitySlot {
    fn identify(&self) -> Option<Uuid> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An owner id that has been checked against the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedOwner(Uuid);

impl VerifiedOwner {
    pub(crate) fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(self) -> Uuid {
        self.0
    }
}

/// Which designs a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    /// All of the caller's designs.
    Owner,
    /// Every public design.
    Public,
    /// The caller's private designs.
    Private,
}

// =============================================================================
// BOUNDARY
// =============================================================================

#[derive(Clone)]
pub struct AccessBoundary {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DesignStore>,
}

impl AccessBoundary {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DesignStore>) -> Self {
        Self { identity, store }
    }

    /// Resolve the current identity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` when nobody is signed in.
    pub fn identify(&self) -> Result<VerifiedOwner, DesignError> {
        self.identity.identify().map(VerifiedOwner::new).ok_or(DesignError::Unauthenticated)
    }

    /// Whether `owner` may write a document owned by `document_owner`.
    #[must_use]
    pub fn authorize(owner: VerifiedOwner, document_owner: Uuid) -> bool {
        owner.0 == document_owner
    }

    /// Read one design, respecting visibility.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent; for private designs `Unauthenticated` when
    /// nobody is signed in and `Forbidden` for anyone but the owner.
    pub async fn fetch(&self, id: Uuid) -> Result<DesignDocument, DesignError> {
        let doc = self.store.fetch(id).await?;
        if doc.is_public {
            return Ok(doc);
        }
        let owner = self.identify()?;
        if !Self::authorize(owner, doc.owner_id) {
            warn!(design_id = %id, user_id = %owner.0, "private design read refused");
            return Err(DesignError::Forbidden);
        }
        Ok(doc)
    }

    /// List designs, newest first.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for `Owner` and `Private` when nobody is signed in.
    pub async fn list_visible(&self, filter: VisibilityFilter) -> Result<Vec<DesignDocument>, DesignError> {
        let query = match filter {
            VisibilityFilter::Public => ListQuery::Public,
            VisibilityFilter::Owner => ListQuery::Owner(self.identify()?.0),
            VisibilityFilter::Private => ListQuery::Private(self.identify()?.0),
        };
        Ok(self.store.list(query).await?)
    }

    /// Store a new design owned by the current identity.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when nobody is signed in; `Forbidden` if the draft
    /// was prepared for someone else.
    pub async fn create(&self, draft: DocumentDraft) -> Result<DesignDocument, DesignError> {
        let owner = self.identify()?;
        if !Self::authorize(owner, draft.owner_id) {
            warn!(user_id = %owner.0, draft_owner = %draft.owner_id, "create for another owner refused");
            return Err(DesignError::Forbidden);
        }
        let doc = self.store.insert(draft).await?;
        info!(design_id = %doc.id, owner_id = %doc.owner_id, kind = %doc.kind, "design created");
        Ok(doc)
    }

    /// Overwrite a design's name, type, visibility and data in place.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`, `NotFound`, or `Forbidden` when the caller does not
    /// own the stored design. A refused update leaves it untouched.
    pub async fn update(&self, id: Uuid, draft: DocumentDraft) -> Result<DesignDocument, DesignError> {
        self.require_owner(id).await?;
        let doc = self.store.update(id, DocumentPatch::from_draft(draft)).await?;
        info!(design_id = %id, "design updated");
        Ok(doc)
    }

    /// Delete a design.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`, `NotFound`, or `Forbidden` for non-owners.
    pub async fn delete(&self, id: Uuid) -> Result<(), DesignError> {
        self.require_owner(id).await?;
        self.store.delete(id).await?;
        info!(design_id = %id, "design deleted");
        Ok(())
    }

    /// Flip a design between public and private.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`, `NotFound`, or `Forbidden` for non-owners.
    pub async fn toggle_visibility(&self, id: Uuid) -> Result<DesignDocument, DesignError> {
        let current = self.require_owner(id).await?;
        let doc = self.store.set_visibility(id, !current.is_public).await?;
        info!(design_id = %id, is_public = doc.is_public, "design visibility toggled");
        Ok(doc)
    }

    async fn require_owner(&self, id: Uuid) -> Result<DesignDocument, DesignError> {
        let owner = self.identify()?;
        let doc = self.store.fetch(id).await?;
        if !Self::authorize(owner, doc.owner_id) {
            warn!(design_id = %id, user_id = %owner.0, "write by non-owner refused");
            return Err(DesignError::Forbidden);
        }
        Ok(doc)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
