//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

type MappingRow = (
    i64,
    Option<i64>,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn into_mapping(row: MappingRow) -> Mapping {
    Mapping::new(row.0, row.1, row.2, row.3, row.4, row.5)
}

/// PostgreSQL repository for mapping storage and retrieval.
///
/// Uses parameterized statements throughout; the unique index on `hash`
/// backs the allocator's uniqueness guarantee.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn resolve(&self, hash: &str) -> Result<Option<String>, AppError> {
        let destination: Option<String> =
            sqlx::query_scalar("SELECT destination_url FROM mappings WHERE hash = $1")
                .bind(hash)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(destination)
    }

    async fn hash_exists(&self, hash: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM mappings WHERE hash = $1)")
                .bind(hash)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, AppError> {
        let row: MappingRow = sqlx::query_as(
            r#"
            INSERT INTO mappings (owner_id, hash, destination_url)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, hash, destination_url, created_at, updated_at
            "#,
        )
        .bind(new_mapping.owner_id)
        .bind(&new_mapping.hash)
        .bind(&new_mapping.destination_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(into_mapping(row))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Mapping>, AppError> {
        let rows: Vec<MappingRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, hash, destination_url, created_at, updated_at
            FROM mappings
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(into_mapping).collect())
    }

    async fn update_destination(
        &self,
        id: i64,
        owner_id: i64,
        destination_url: &str,
    ) -> Result<Mapping, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            r#"
            UPDATE mappings
            SET destination_url = $3, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, hash, destination_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(destination_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(into_mapping).ok_or_else(|| {
            AppError::not_found("Mapping not found", serde_json::json!({ "id": id }))
        })
    }
}
