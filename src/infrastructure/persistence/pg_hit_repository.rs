//! PostgreSQL implementation of the hit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Hit, NewHit};
use crate::domain::repositories::HitRepository;
use crate::error::AppError;

/// PostgreSQL repository for the hit write path.
pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn save(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let (id, timestamp): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO hits (
                timestamp, ip_address, request_url, request_method,
                request_headers, processing_status
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, timestamp
            "#,
        )
        .bind(new_hit.timestamp)
        .bind(&new_hit.ip_address)
        .bind(&new_hit.request_url)
        .bind(&new_hit.request_method)
        .bind(&new_hit.request_headers)
        .bind(&new_hit.processing_status)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Hit {
            id,
            timestamp,
            ip_address: new_hit.ip_address,
            request_url: new_hit.request_url,
            request_method: new_hit.request_method,
            request_headers: new_hit.request_headers,
            processing_status: new_hit.processing_status,
        })
    }
}
