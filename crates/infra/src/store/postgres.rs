//! Postgres-backed document store.
//!
//! Each record is kept as a JSONB document in the `birds` table. The `id`,
//! `owner` and timestamp columns duplicate document fields so lookups and the
//! owner filter can use indexes.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database / Io / Tls / Protocol / PoolTimedOut / PoolClosed | `Backend` |
//! | ColumnDecode / Decode / ColumnNotFound | `Corrupt` |
//! | Other | `Backend` |

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::instrument;

use aviary_core::{Bird, BirdId, UserId};

use super::r#trait::{BirdStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS birds (
    id UUID PRIMARY KEY,
    owner UUID NOT NULL,
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

const CREATE_OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS birds_owner_idx ON birds (owner)";

/// Postgres-backed bird store.
///
/// `Send + Sync`; all access goes through the SQLx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresBirdStore {
    pool: Arc<PgPool>,
}

impl PostgresBirdStore {
    /// Create a new PostgresBirdStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `birds` table and its owner index if they do not exist.
    #[instrument(skip_all, err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_table", e))?;
        sqlx::query(CREATE_OWNER_INDEX)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_owner_index", e))?;
        Ok(())
    }

    fn decode_rows(rows: Vec<sqlx::postgres::PgRow>) -> Result<Vec<Bird>, StoreError> {
        rows.iter().map(decode_row).collect()
    }
}

#[async_trait]
impl BirdStore for PostgresBirdStore {
    #[instrument(skip_all, fields(owner = %owner), err)]
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Bird>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT document
            FROM birds
            WHERE owner = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_owner", e))?;

        Self::decode_rows(rows)
    }

    #[instrument(skip_all, err)]
    async fn find_all(&self) -> Result<Vec<Bird>, StoreError> {
        let rows = sqlx::query("SELECT document FROM birds ORDER BY created_at ASC, id ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        Self::decode_rows(rows)
    }

    #[instrument(skip_all, fields(bird_id = %id), err)]
    async fn find_by_id(&self, id: BirdId) -> Result<Option<Bird>, StoreError> {
        let row = sqlx::query("SELECT document FROM birds WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(decode_row).transpose()
    }

    #[instrument(skip_all, fields(bird_id = %bird.id, owner = %bird.owner), err)]
    async fn insert(&self, bird: &Bird) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO birds (id, owner, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(bird.id.as_uuid())
        .bind(bird.owner.as_uuid())
        .bind(Json(bird))
        .bind(bird.created_at)
        .bind(bird.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(())
    }

    #[instrument(skip_all, fields(bird_id = %bird.id), err)]
    async fn update(&self, bird: &Bird) -> Result<(), StoreError> {
        // `owner` and `created_at` columns are left alone: they never change.
        sqlx::query(
            r#"
            UPDATE birds
            SET document = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(bird.id.as_uuid())
        .bind(Json(bird))
        .bind(bird.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(())
    }

    #[instrument(skip_all, fields(bird_id = %id), err)]
    async fn delete(&self, id: BirdId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM birds WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(())
    }
}

fn decode_row(row: &sqlx::postgres::PgRow) -> Result<Bird, StoreError> {
    row.try_get::<Json<Bird>, _>("document")
        .map(|Json(bird)| bird)
        .map_err(|e| map_sqlx_error("decode_document", e))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Backend(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(format!("{}: {}", operation, err))
        }
        other => StoreError::Backend(format!("{}: {}", operation, other)),
    }
}
