//! Persistence worker binary: consumes the durable hit queue.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use redirect_tracker::config;
use redirect_tracker::domain::classify::Classifier;
use redirect_tracker::infrastructure::persistence::{
    PgHitRepository, PgMappingRepository, PgRedirectHistoryRepository,
};
use redirect_tracker::infrastructure::queue::PgHitQueue;
use redirect_tracker::worker::{HitWorker, HitWorkerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let queue = Arc::new(PgHitQueue::new(
        pool.clone(),
        config.queue_max_attempts,
        config.queue_retry_backoff_ms,
    ));
    let hits = Arc::new(PgHitRepository::new(pool.clone()));
    let mappings = Arc::new(PgMappingRepository::new(pool.clone()));
    let history = Arc::new(PgRedirectHistoryRepository::new(pool));

    let worker = HitWorker::new(
        queue,
        hits,
        mappings,
        history,
        Classifier::new(&config.known_destinations),
        HitWorkerConfig {
            batch_size: config.worker_batch_size,
            concurrency: config.worker_concurrency,
            poll_interval: Duration::from_millis(config.queue_poll_interval_ms),
        },
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining in-flight messages");
        let _ = shutdown_tx.send(true);
    });

    worker.run(shutdown_rx).await;

    tracing::info!("Worker stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::error!("Failed to install SIGTERM handler: {e}");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}
