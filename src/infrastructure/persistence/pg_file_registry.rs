use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{FileRegistry, RegistryError};
use crate::domain::{OwnerId, UploadedFileRecord};

/// Durable registry backed by Postgres. Queries are runtime-checked so the
/// crate builds without a live database.
pub struct PgFileRegistry {
    pool: PgPool,
}

impl PgFileRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bootstrap the schema; idempotent.
    pub async fn migrate(&self) -> Result<(), RegistryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS uploaded_files (
                owner_id    TEXT NOT NULL,
                filename    TEXT NOT NULL,
                path        TEXT NOT NULL,
                uploaded_at TIMESTAMPTZ NOT NULL,
                size_bytes  BIGINT NOT NULL,
                PRIMARY KEY (owner_id, filename)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<UploadedFileRecord, RegistryError> {
        let filename: String = row
            .try_get("filename")
            .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;
        let path: String = row
            .try_get("path")
            .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;
        let uploaded_at: DateTime<Utc> = row
            .try_get("uploaded_at")
            .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;
        let size_bytes: i64 = row
            .try_get("size_bytes")
            .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;

        Ok(UploadedFileRecord {
            filename,
            path: PathBuf::from(path),
            uploaded_at,
            size_bytes: size_bytes as u64,
        })
    }
}

#[async_trait]
impl FileRegistry for PgFileRegistry {
    #[instrument(skip(self, record), fields(owner = %owner, filename = %record.filename))]
    async fn put(&self, owner: &OwnerId, record: UploadedFileRecord) -> Result<(), RegistryError> {
        sqlx::query(
            r#"
            INSERT INTO uploaded_files (owner_id, filename, path, uploaded_at, size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner_id, filename)
            DO UPDATE SET path = $3, uploaded_at = $4, size_bytes = $5
            "#,
        )
        .bind(owner.as_str())
        .bind(&record.filename)
        .bind(record.path.to_string_lossy().into_owned())
        .bind(record.uploaded_at)
        .bind(record.size_bytes as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<UploadedFileRecord>, RegistryError> {
        let rows = sqlx::query(
            r#"
            SELECT filename, path, uploaded_at, size_bytes
            FROM uploaded_files
            WHERE owner_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    #[instrument(skip(self))]
    async fn list_guest_scoped(&self) -> Result<Vec<UploadedFileRecord>, RegistryError> {
        let rows = sqlx::query(
            r#"
            SELECT filename, path, uploaded_at, size_bytes
            FROM uploaded_files
            WHERE owner_id LIKE 'guest\_%'
            ORDER BY uploaded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RegistryError::QueryFailed(e.to_string()))?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
