//! Postgres design store over the `designs` table.

#[cfg(test)]
#[path = "postgres_test.rs"]
mod postgres_test;

use scene::clock::now_ms;
use scene::doc::Mode;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{DesignStore, ListQuery, StoreError};
use crate::document::{DesignDocument, DocumentDraft, DocumentPatch};

type DesignRow = (Uuid, Uuid, String, String, bool, serde_json::Value, i64);

const COLUMNS: &str = "id, owner_id, name, kind, is_public, design_data, created_at";

fn decode_row(row: DesignRow) -> Result<DesignDocument, StoreError> {
    let (id, owner_id, name, kind, is_public, design_data, created_at) = row;
    let kind = kind
        .parse::<Mode>()
        .map_err(|e| StoreError::Decode(format!("design {id}: {e}")))?;
    Ok(DesignDocument { id, owner_id, name, kind, is_public, design_data, created_at })
}

#[derive(Clone)]
pub struct PgDesignStore {
    pool: PgPool,
}

impl PgDesignStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DesignStore for PgDesignStore {
    async fn fetch(&self, id: Uuid) -> Result<DesignDocument, StoreError> {
        let row = sqlx::query_as::<_, DesignRow>(&format!("SELECT {COLUMNS} FROM designs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map_or(Err(StoreError::NotFound(id)), decode_row)
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<DesignDocument>, StoreError> {
        let rows = match query {
            ListQuery::Owner(owner) => {
                sqlx::query_as::<_, DesignRow>(&format!(
                    "SELECT {COLUMNS} FROM designs WHERE owner_id = $1 ORDER BY created_at DESC"
                ))
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
            ListQuery::Public => {
                sqlx::query_as::<_, DesignRow>(&format!(
                    "SELECT {COLUMNS} FROM designs WHERE is_public ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            ListQuery::Private(owner) => {
                sqlx::query_as::<_, DesignRow>(&format!(
                    "SELECT {COLUMNS} FROM designs WHERE owner_id = $1 AND NOT is_public ORDER BY created_at DESC"
                ))
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, draft: DocumentDraft) -> Result<DesignDocument, StoreError> {
        let doc = DesignDocument::from_draft(Uuid::new_v4(), draft, now_ms());
        sqlx::query(
            "INSERT INTO designs (id, owner_id, name, kind, is_public, design_data, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(doc.id)
        .bind(doc.owner_id)
        .bind(&doc.name)
        .bind(doc.kind.as_str())
        .bind(doc.is_public)
        .bind(&doc.design_data)
        .bind(doc.created_at)
        .execute(&self.pool)
        .await?;

        info!(design_id = %doc.id, owner_id = %doc.owner_id, "design inserted");
        Ok(doc)
    }

    async fn update(&self, id: Uuid, patch: DocumentPatch) -> Result<DesignDocument, StoreError> {
        let row = sqlx::query_as::<_, DesignRow>(&format!(
            "UPDATE designs
             SET name = COALESCE($2, name),
                 kind = COALESCE($3, kind),
                 is_public = COALESCE($4, is_public),
                 design_data = COALESCE($5, design_data)
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.kind.map(Mode::as_str))
        .bind(patch.is_public)
        .bind(patch.design_data)
        .fetch_optional(&self.pool)
        .await?;
        row.map_or(Err(StoreError::NotFound(id)), decode_row)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM designs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!(design_id = %id, "design deleted");
        Ok(())
    }
}
