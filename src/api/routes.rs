//! Management API route configuration.
//!
//! All endpoints here require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{create_mapping_handler, list_mappings_handler, update_mapping_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Management routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET  /mappings`      - List an owner's mappings
/// - `POST /mappings`      - Create a mapping with a freshly allocated hash
/// - `PUT  /mappings/{id}` - Replace a mapping's destination URL
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/mappings",
            get(list_mappings_handler).post(create_mapping_handler),
        )
        .route("/mappings/{id}", put(update_mapping_handler))
}
