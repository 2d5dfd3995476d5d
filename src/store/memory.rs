//! In-memory design store.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;

use scene::clock::now_ms;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DesignStore, ListQuery, StoreError};
use crate::document::{DesignDocument, DocumentDraft, DocumentPatch};

struct Entry {
    /// Insertion sequence; breaks ties between documents created in the same millisecond.
    seq: u64,
    doc: DesignDocument,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    docs: HashMap<Uuid, Entry>,
}

/// Documents held in a `RwLock`-guarded map.
#[derive(Default)]
pub struct MemoryDesignStore {
    inner: RwLock<Inner>,
}

impl MemoryDesignStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.read().await.docs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.docs.is_empty()
    }
}

#[async_trait::async_trait]
impl DesignStore for MemoryDesignStore {
    async fn fetch(&self, id: Uuid) -> Result<DesignDocument, StoreError> {
        let inner = self.inner.read().await;
        inner
            .docs
            .get(&id)
            .map(|e| e.doc.clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<DesignDocument>, StoreError> {
        let inner = self.inner.read().await;
        let mut hits: Vec<&Entry> = inner.docs.values().filter(|e| query.matches(&e.doc)).collect();
        hits.sort_by(|a, b| (b.doc.created_at, b.seq).cmp(&(a.doc.created_at, a.seq)));
        Ok(hits.into_iter().map(|e| e.doc.clone()).collect())
    }

    async fn insert(&self, draft: DocumentDraft) -> Result<DesignDocument, StoreError> {
        let doc = DesignDocument::from_draft(Uuid::new_v4(), draft, now_ms());
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.docs.insert(doc.id, Entry { seq, doc: doc.clone() });
        Ok(doc)
    }

    async fn update(&self, id: Uuid, patch: DocumentPatch) -> Result<DesignDocument, StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.docs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply(&mut entry.doc);
        Ok(entry.doc.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.docs.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}
