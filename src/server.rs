//! HTTP gateway initialization and runtime setup.
//!
//! Handles database connections, migrations, queue wiring, and the Axum
//! server lifecycle. The persistence worker runs as its own binary
//! (`src/bin/worker.rs`); the gateway only publishes.

use crate::config::Config;
use crate::infrastructure::persistence::PgMappingRepository;
use crate::infrastructure::queue::PgHitQueue;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP gateway with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Durable hit queue (publisher side)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, the bind, or the server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let mappings = Arc::new(PgMappingRepository::new(pool.clone()));
    let queue = Arc::new(PgHitQueue::new(
        pool,
        config.queue_max_attempts,
        config.queue_retry_backoff_ms,
    ));

    let state = AppState::new(mappings, queue, config.api_token.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
