//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{hash}`   - Redirect resolver (public, unauthenticated hot path)
//! - `GET  /`         - 400; a hash is required
//! - `GET  /health`   - Health check: DB, hit queue (public)
//! - `/api/*`         - Mapping management (Bearer token required)
//!
//! Non-GET requests to `/{hash}` get a 405 from the method router.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on the management API only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, missing_hash_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/", get(missing_hash_handler))
        .route("/health", get(health_handler))
        .route("/{hash}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
