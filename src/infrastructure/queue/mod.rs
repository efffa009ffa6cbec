//! Durable work queue decoupling the resolver from persistence.
//!
//! The resolver publishes [`crate::domain::hit_event::HitEvent`]s; the
//! persistence worker claims them with manual acknowledgment. Delivery is
//! at-least-once: a message stays on the queue until it is acked, and a
//! crashed consumer's claims become visible again after their lease expires.
//!
//! Two implementations:
//!
//! - [`PgHitQueue`] - PostgreSQL-backed, durable across restarts. Claims use
//!   `FOR UPDATE SKIP LOCKED` so competing consumers never double-claim.
//! - [`MemoryHitQueue`] - in-process, same semantics minus durability. Used
//!   in tests and single-process setups.
//!
//! Redelivery is bounded: the attempt counter travels with each delivery,
//! and messages that fail terminally (malformed payload) or exhaust their
//! attempts are moved to a dead-letter sink instead of looping forever.

pub mod memory_hit_queue;
pub mod pg_hit_queue;

pub use memory_hit_queue::MemoryHitQueue;
pub use pg_hit_queue::PgHitQueue;

use crate::domain::hit_event::HitEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// One claimed queue message.
///
/// `attempts` counts deliveries including this one, so the reject path can
/// decide between requeue and dead-letter without extra lookups.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub id: i64,
    pub attempts: i32,
    pub payload: Vec<u8>,
}

/// How a failed delivery should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    /// Transient failure (store unreachable). Requeue with backoff until the
    /// attempt limit is reached.
    Retryable,
    /// Permanent failure (malformed payload). Dead-letter immediately.
    Terminal,
}

/// Publish/claim/ack contract over the durable hit queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitQueue: Send + Sync {
    /// Enqueues a serialized hit event.
    ///
    /// This is the only durability guarantee on the hot path: the resolver
    /// surfaces a publish failure to the caller instead of dropping the hit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the event cannot be enqueued.
    async fn publish(&self, event: &HitEvent) -> Result<(), AppError>;

    /// Claims up to `batch` ready messages for exclusive processing.
    ///
    /// Claimed messages are invisible to other consumers until acked,
    /// rejected, or their lease expires.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the queue is unreachable.
    async fn claim(&self, batch: i64) -> Result<Vec<Delivery>, AppError>;

    /// Acknowledges a delivery, permanently removing the message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the queue is unreachable.
    async fn ack(&self, delivery: &Delivery) -> Result<(), AppError>;

    /// Rejects a delivery.
    ///
    /// Retryable rejections requeue the message with exponential backoff;
    /// terminal rejections and attempt exhaustion move it to the dead-letter
    /// sink with `reason` attached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the queue is unreachable.
    async fn reject(
        &self,
        delivery: &Delivery,
        kind: RejectKind,
        reason: &str,
    ) -> Result<(), AppError>;

    /// Number of messages currently on the queue (ready or claimed).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the queue is unreachable.
    async fn depth(&self) -> Result<i64, AppError>;
}
