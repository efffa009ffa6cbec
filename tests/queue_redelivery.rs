mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use common::{FakeMappingRepo, FlakyHitRepo, RecordingHistoryRepo, RecordingHitRepo};
use redirect_tracker::domain::classify::Classifier;
use redirect_tracker::domain::hit_event::HitEvent;
use redirect_tracker::infrastructure::queue::{HitQueue, MemoryHitQueue};
use redirect_tracker::worker::{HitWorker, HitWorkerConfig};

fn worker_config() -> HitWorkerConfig {
    HitWorkerConfig {
        batch_size: 10,
        concurrency: 2,
        poll_interval: Duration::from_millis(10),
    }
}

async fn drain(worker: HitWorker, queue: Arc<MemoryHitQueue>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while queue.depth().await.unwrap() > 0 {
        assert!(
            tokio::time::Instant::now() < deadline,
            "queue did not drain in time"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload_is_dead_lettered_not_lost() {
    let queue = Arc::new(MemoryHitQueue::new(5));
    let hits = Arc::new(RecordingHitRepo::default());
    let history = Arc::new(RecordingHistoryRepo::default());

    queue.publish_raw(b"definitely not json".to_vec());

    let worker = HitWorker::new(
        queue.clone(),
        hits.clone(),
        Arc::new(FakeMappingRepo::new(&[])),
        history.clone(),
        Classifier::new(&[]),
        worker_config(),
    );
    drain(worker, queue.clone()).await;

    // Terminal failure: one attempt, straight to the dead-letter sink.
    let dead = queue.dead_letters();
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].attempts, 1);
    assert!(dead[0].failure_reason.starts_with("malformed payload"));
    assert_eq!(dead[0].payload, b"definitely not json");

    assert!(hits.saved().is_empty());
    assert_eq!(queue.ready_len(), 0);
}

#[tokio::test]
async fn test_transient_store_failure_is_redelivered_and_succeeds() {
    let queue = Arc::new(MemoryHitQueue::new(5));
    let hits = Arc::new(FlakyHitRepo::default());
    let history = Arc::new(RecordingHistoryRepo::default());

    let event = HitEvent::new(
        "10.0.0.1".to_string(),
        "/abc123?click_id=xyz".to_string(),
        "GET".to_string(),
        "{}".to_string(),
    );
    queue.publish(&event).await.unwrap();

    let worker = HitWorker::new(
        queue.clone(),
        hits.clone(),
        Arc::new(FakeMappingRepo::new(&[("abc123", "http://site1.com/offer")])),
        history.clone(),
        Classifier::new(&["site1".to_string()]),
        worker_config(),
    );
    drain(worker, queue.clone()).await;

    // First delivery failed, the redelivery went through.
    assert_eq!(hits.saved().len(), 1);
    assert_eq!(history.saved().len(), 1);
    assert!(queue.dead_letters().is_empty());
}

#[tokio::test]
async fn test_persistent_failure_exhausts_attempts_into_dead_letters() {
    struct AlwaysFailingHitRepo;

    #[async_trait::async_trait]
    impl redirect_tracker::domain::repositories::HitRepository for AlwaysFailingHitRepo {
        async fn save(
            &self,
            _new_hit: redirect_tracker::domain::entities::NewHit,
        ) -> Result<redirect_tracker::domain::entities::Hit, redirect_tracker::error::AppError>
        {
            Err(redirect_tracker::error::AppError::internal(
                "Database error",
                serde_json::json!({}),
            ))
        }
    }

    let queue = Arc::new(MemoryHitQueue::new(3));
    let history = Arc::new(RecordingHistoryRepo::default());

    let event = HitEvent::new(
        "10.0.0.1".to_string(),
        "/abc123?click_id=xyz".to_string(),
        "GET".to_string(),
        "{}".to_string(),
    );
    queue.publish(&event).await.unwrap();

    let worker = HitWorker::new(
        queue.clone(),
        Arc::new(AlwaysFailingHitRepo),
        Arc::new(FakeMappingRepo::new(&[])),
        history.clone(),
        Classifier::new(&[]),
        worker_config(),
    );
    drain(worker, queue.clone()).await;

    let dead = queue.dead_letters();
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].attempts, 3);
    assert!(history.saved().is_empty());
}
