//! PostgreSQL implementation of the redirect-history repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewRedirectRecord, RedirectRecord};
use crate::domain::repositories::RedirectHistoryRepository;
use crate::error::AppError;

/// PostgreSQL repository for the redirect-history write path.
pub struct PgRedirectHistoryRepository {
    pool: Arc<PgPool>,
}

impl PgRedirectHistoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedirectHistoryRepository for PgRedirectHistoryRepository {
    async fn save(&self, record: NewRedirectRecord) -> Result<RedirectRecord, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO redirect_history (
                hit_id, original_url, redirect_url,
                redirect_type, redirect_status, redirect_timestamp
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.hit_id)
        .bind(&record.original_url)
        .bind(&record.redirect_url)
        .bind(&record.redirect_type)
        .bind(record.redirect_status)
        .bind(record.redirect_timestamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(RedirectRecord {
            id,
            hit_id: record.hit_id,
            original_url: record.original_url,
            redirect_url: record.redirect_url,
            redirect_type: record.redirect_type,
            redirect_status: record.redirect_status,
            redirect_timestamp: record.redirect_timestamp,
        })
    }
}
