//! Background worker persisting queued hit events.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, watch};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::classify::Classifier;
use crate::domain::entities::{Hit, NewHit, NewRedirectRecord};
use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::{HitRepository, MappingRepository, RedirectHistoryRepository};
use crate::error::AppError;
use crate::infrastructure::queue::{Delivery, HitQueue, RejectKind};
use crate::utils::extract_hash::extract_hash;

/// HTTP status recorded in redirect-history records; the resolver answers
/// with a temporary redirect.
const REDIRECT_STATUS: i32 = 302;

/// Processing status stamped on every persisted hit.
const STATUS_PROCESSED: &str = "processed";

/// Tuning knobs for the worker loop, taken from
/// [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct HitWorkerConfig {
    pub batch_size: i64,
    pub concurrency: usize,
    pub poll_interval: Duration,
}

/// The persistence worker: claims hit events from the durable queue and
/// writes hit and redirect-history records.
///
/// One logical consumption loop per process; each claimed message is handled
/// by its own task, bounded by a semaphore. Multiple worker processes may run
/// side by side - the queue is the sole arbiter of which consumer receives
/// which message.
pub struct HitWorker {
    queue: Arc<dyn HitQueue>,
    hits: Arc<dyn HitRepository>,
    mappings: Arc<dyn MappingRepository>,
    history: Arc<dyn RedirectHistoryRepository>,
    classifier: Classifier,
    config: HitWorkerConfig,
    limiter: Arc<Semaphore>,
}

impl HitWorker {
    pub fn new(
        queue: Arc<dyn HitQueue>,
        hits: Arc<dyn HitRepository>,
        mappings: Arc<dyn MappingRepository>,
        history: Arc<dyn RedirectHistoryRepository>,
        classifier: Classifier,
        config: HitWorkerConfig,
    ) -> Self {
        let limiter = Arc::new(Semaphore::new(config.concurrency));
        Self {
            queue,
            hits,
            mappings,
            history,
            classifier,
            config,
            limiter,
        }
    }

    /// Runs the consumption loop until `shutdown` flips to `true`.
    ///
    /// In-flight messages finish before the loop returns; unclaimed and
    /// unacked messages stay on the queue for the next run (at-least-once).
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            batch_size = self.config.batch_size,
            concurrency = self.config.concurrency,
            "Hit worker started"
        );

        while !*shutdown.borrow() {
            let deliveries = match self.queue.claim(self.config.batch_size).await {
                Ok(deliveries) => deliveries,
                Err(e) => {
                    warn!("Failed to claim from queue: {e}");
                    self.idle(&mut shutdown).await;
                    continue;
                }
            };

            if deliveries.is_empty() {
                self.idle(&mut shutdown).await;
                continue;
            }

            let mut tasks = JoinSet::new();
            for delivery in deliveries {
                let Ok(permit) = self.limiter.clone().acquire_owned().await else {
                    break;
                };

                let queue = self.queue.clone();
                let hits = self.hits.clone();
                let mappings = self.mappings.clone();
                let history = self.history.clone();
                let classifier = self.classifier.clone();

                tasks.spawn(async move {
                    handle_delivery(queue, hits, mappings, history, &classifier, delivery).await;
                    drop(permit);
                });
            }

            // Drain the batch before claiming again so shutdown never
            // abandons in-flight messages.
            while tasks.join_next().await.is_some() {}
        }

        info!("Hit worker stopped");
    }

    async fn idle(&self, shutdown: &mut watch::Receiver<bool>) {
        tokio::select! {
            _ = tokio::time::sleep(self.config.poll_interval) => {}
            _ = shutdown.changed() => {}
        }
    }
}

/// Handles one claimed message end to end: deserialize, process, settle.
///
/// Deserialization failures are terminal (the payload will never parse on
/// redelivery); processing failures are retryable. Settlement failures only
/// get logged - the queue lease will redeliver the message.
async fn handle_delivery(
    queue: Arc<dyn HitQueue>,
    hits: Arc<dyn HitRepository>,
    mappings: Arc<dyn MappingRepository>,
    history: Arc<dyn RedirectHistoryRepository>,
    classifier: &Classifier,
    delivery: Delivery,
) {
    let event: HitEvent = match serde_json::from_slice(&delivery.payload) {
        Ok(event) => event,
        Err(e) => {
            error!(delivery_id = delivery.id, "Malformed hit event: {e}");
            let reason = format!("malformed payload: {e}");
            if let Err(e) = queue
                .reject(&delivery, RejectKind::Terminal, &reason)
                .await
            {
                error!(delivery_id = delivery.id, "Failed to dead-letter message: {e}");
            }
            return;
        }
    };

    match process_hit(&hits, &mappings, &history, classifier, &event).await {
        Ok(hit) => {
            counter!("hits_processed_total").increment(1);
            if let Err(e) = queue.ack(&delivery).await {
                error!(
                    delivery_id = delivery.id,
                    hit_id = hit.id,
                    "Failed to ack message: {e}"
                );
            }
        }
        Err(e) => {
            warn!(delivery_id = delivery.id, "Failed to process hit event: {e}");
            if let Err(e) = queue
                .reject(&delivery, RejectKind::Retryable, &e.to_string())
                .await
            {
                error!(delivery_id = delivery.id, "Failed to requeue message: {e}");
            }
        }
    }
}

/// Processes one hit event, strictly sequentially:
///
/// 1. Persist the hit record with status `processed`.
/// 2. Extract the hash candidate from the raw request path.
/// 3. Re-resolve the hash against the mapping store (authoritative).
/// 4. Persist a redirect-history record when a destination was resolved.
///
/// Any failure fails the whole message; there is no partial-success retry of
/// a single step. A redelivered message re-runs all four steps, so duplicate
/// hit records are possible (at-least-once semantics).
pub async fn process_hit(
    hits: &Arc<dyn HitRepository>,
    mappings: &Arc<dyn MappingRepository>,
    history: &Arc<dyn RedirectHistoryRepository>,
    classifier: &Classifier,
    event: &HitEvent,
) -> Result<Hit, AppError> {
    let hit = hits
        .save(NewHit {
            timestamp: event.timestamp,
            ip_address: event.ip_address.clone(),
            request_url: event.request_url.clone(),
            request_method: event.request_method.clone(),
            request_headers: event.request_headers.clone(),
            processing_status: STATUS_PROCESSED.to_string(),
        })
        .await?;

    // No hash candidate or no mapping is a valid outcome, not an error;
    // the hit stays recorded without redirect history.
    let Some(hash) = extract_hash(&event.request_url) else {
        return Ok(hit);
    };

    let Some(destination_url) = mappings.resolve(&hash).await? else {
        return Ok(hit);
    };

    history
        .save(NewRedirectRecord {
            hit_id: hit.id,
            original_url: event.request_url.clone(),
            redirect_type: classifier.classify(&destination_url),
            redirect_url: destination_url,
            redirect_status: REDIRECT_STATUS,
            redirect_timestamp: event.timestamp,
        })
        .await?;

    counter!("redirect_history_recorded_total").increment(1);
    Ok(hit)
}
