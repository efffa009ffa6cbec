//! PostgreSQL-backed durable hit queue.

use async_trait::async_trait;
use metrics::counter;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::hit_event::HitEvent;
use crate::error::AppError;
use crate::infrastructure::queue::{Delivery, HitQueue, RejectKind};

/// Seconds a claimed message stays invisible before it is redelivered.
/// Covers worker crashes mid-processing; at-least-once, not exactly-once.
const CLAIM_LEASE_SECONDS: f64 = 60.0;

/// Upper bound for the exponential redelivery backoff.
const MAX_BACKOFF_SECONDS: f64 = 3600.0;

/// Durable work queue on top of two PostgreSQL tables.
///
/// `hit_queue` holds live messages; `hit_queue_dead` is the dead-letter sink.
/// Claims take row locks with `FOR UPDATE SKIP LOCKED`, so any number of
/// worker processes can compete for messages without coordination - the
/// database is the sole arbiter of which consumer receives which message.
///
/// Durability comes for free: queued messages survive restarts of both the
/// gateway and the workers.
pub struct PgHitQueue {
    pool: Arc<PgPool>,
    max_attempts: i32,
    retry_backoff_ms: u64,
}

impl PgHitQueue {
    /// Creates a queue handle.
    ///
    /// `max_attempts` bounds redelivery; `retry_backoff_ms` is the base
    /// requeue delay, doubling per attempt up to one hour.
    pub fn new(pool: Arc<PgPool>, max_attempts: i32, retry_backoff_ms: u64) -> Self {
        Self {
            pool,
            max_attempts,
            retry_backoff_ms,
        }
    }

    fn backoff_seconds(&self, attempts: i32) -> f64 {
        let base = self.retry_backoff_ms as f64 / 1000.0;
        let exp = attempts.saturating_sub(1).min(20) as u32;
        (base * f64::from(2u32.saturating_pow(exp))).min(MAX_BACKOFF_SECONDS)
    }

    async fn dead_letter(&self, delivery: &Delivery, reason: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            WITH moved AS (
                DELETE FROM hit_queue
                WHERE id = $1
                RETURNING id, payload, attempts
            )
            INSERT INTO hit_queue_dead (queue_id, payload, attempts, failure_reason)
            SELECT id, payload, attempts, $2 FROM moved
            "#,
        )
        .bind(delivery.id)
        .bind(reason)
        .execute(self.pool.as_ref())
        .await?;

        counter!("hit_queue_dead_lettered_total").increment(1);
        tracing::error!(
            delivery_id = delivery.id,
            attempts = delivery.attempts,
            reason,
            "Message moved to dead-letter queue"
        );

        Ok(())
    }
}

#[async_trait]
impl HitQueue for PgHitQueue {
    async fn publish(&self, event: &HitEvent) -> Result<(), AppError> {
        let payload = serde_json::to_vec(event).map_err(|e| {
            AppError::internal(
                "Failed to serialize hit event",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;

        sqlx::query("INSERT INTO hit_queue (payload) VALUES ($1)")
            .bind(payload)
            .execute(self.pool.as_ref())
            .await?;

        counter!("hit_queue_published_total").increment(1);
        Ok(())
    }

    async fn claim(&self, batch: i64) -> Result<Vec<Delivery>, AppError> {
        // SKIP LOCKED keeps competing consumers from blocking each other;
        // bumping available_at gives this claim a redelivery lease.
        let rows: Vec<(i64, i32, Vec<u8>)> = sqlx::query_as(
            r#"
            WITH claimed AS (
                SELECT id FROM hit_queue
                WHERE available_at <= now()
                ORDER BY id
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            UPDATE hit_queue q
            SET attempts = q.attempts + 1,
                available_at = now() + make_interval(secs => $2)
            FROM claimed c
            WHERE q.id = c.id
            RETURNING q.id, q.attempts, q.payload
            "#,
        )
        .bind(batch)
        .bind(CLAIM_LEASE_SECONDS)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, attempts, payload)| Delivery {
                id,
                attempts,
                payload,
            })
            .collect())
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), AppError> {
        sqlx::query("DELETE FROM hit_queue WHERE id = $1")
            .bind(delivery.id)
            .execute(self.pool.as_ref())
            .await?;

        counter!("hit_queue_acked_total").increment(1);
        Ok(())
    }

    async fn reject(
        &self,
        delivery: &Delivery,
        kind: RejectKind,
        reason: &str,
    ) -> Result<(), AppError> {
        if kind == RejectKind::Terminal || delivery.attempts >= self.max_attempts {
            return self.dead_letter(delivery, reason).await;
        }

        sqlx::query(
            "UPDATE hit_queue SET available_at = now() + make_interval(secs => $2) WHERE id = $1",
        )
        .bind(delivery.id)
        .bind(self.backoff_seconds(delivery.attempts))
        .execute(self.pool.as_ref())
        .await?;

        counter!("hit_queue_requeued_total").increment(1);
        tracing::warn!(
            delivery_id = delivery.id,
            attempts = delivery.attempts,
            reason,
            "Message requeued for redelivery"
        );

        Ok(())
    }

    async fn depth(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hit_queue")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
