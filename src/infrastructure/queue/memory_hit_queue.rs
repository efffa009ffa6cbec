//! In-process hit queue with broker semantics.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::hit_event::HitEvent;
use crate::error::AppError;
use crate::infrastructure::queue::{Delivery, HitQueue, RejectKind};

/// A message moved to the in-memory dead-letter sink.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub id: i64,
    pub payload: Vec<u8>,
    pub attempts: i32,
    pub failure_reason: String,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    ready: VecDeque<(i64, i32, Vec<u8>)>,
    in_flight: HashMap<i64, (i32, Vec<u8>)>,
    dead: Vec<DeadLetter>,
}

/// In-memory implementation of [`HitQueue`].
///
/// Same manual-ack and bounded-redelivery semantics as
/// [`crate::infrastructure::queue::PgHitQueue`], minus durability: queued
/// messages do not survive a process restart. Used by tests and by
/// single-process deployments that run the worker in the gateway process.
pub struct MemoryHitQueue {
    inner: Mutex<Inner>,
    max_attempts: i32,
}

impl MemoryHitQueue {
    pub fn new(max_attempts: i32) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_attempts,
        }
    }

    /// Enqueues raw bytes without going through [`HitEvent`] serialization.
    /// Lets tests exercise the malformed-payload path.
    pub fn publish_raw(&self, payload: Vec<u8>) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.ready.push_back((id, 0, payload));
    }

    /// Messages that exhausted their attempts or failed terminally.
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.inner.lock().unwrap().dead.clone()
    }

    /// Number of messages waiting to be claimed.
    pub fn ready_len(&self) -> usize {
        self.inner.lock().unwrap().ready.len()
    }
}

#[async_trait]
impl HitQueue for MemoryHitQueue {
    async fn publish(&self, event: &HitEvent) -> Result<(), AppError> {
        let payload = serde_json::to_vec(event).map_err(|e| {
            AppError::internal(
                "Failed to serialize hit event",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;

        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.ready.push_back((id, 0, payload));

        Ok(())
    }

    async fn claim(&self, batch: i64) -> Result<Vec<Delivery>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let mut deliveries = Vec::new();

        while deliveries.len() < batch as usize {
            let Some((id, attempts, payload)) = inner.ready.pop_front() else {
                break;
            };
            let attempts = attempts + 1;
            inner.in_flight.insert(id, (attempts, payload.clone()));
            deliveries.push(Delivery {
                id,
                attempts,
                payload,
            });
        }

        Ok(deliveries)
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), AppError> {
        self.inner.lock().unwrap().in_flight.remove(&delivery.id);
        Ok(())
    }

    async fn reject(
        &self,
        delivery: &Delivery,
        kind: RejectKind,
        reason: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        let Some((attempts, payload)) = inner.in_flight.remove(&delivery.id) else {
            return Ok(());
        };

        if kind == RejectKind::Terminal || attempts >= self.max_attempts {
            inner.dead.push(DeadLetter {
                id: delivery.id,
                payload,
                attempts,
                failure_reason: reason.to_string(),
            });
        } else {
            inner.ready.push_back((delivery.id, attempts, payload));
        }

        Ok(())
    }

    async fn depth(&self) -> Result<i64, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok((inner.ready.len() + inner.in_flight.len()) as i64)
    }
}
