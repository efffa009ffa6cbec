//! Handler for the redirect hot path.

use axum::{
    Json,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::hit_event::HitEvent;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    pub click_id: Option<String>,
}

/// Resolves a short hash and records the hit.
///
/// # Endpoint
///
/// `GET /{hash}?click_id=<token>`
///
/// # Request Flow
///
/// 1. Validate the `click_id` correlation parameter (400 when missing)
/// 2. Look up the destination URL for the hash (absence is not an error)
/// 3. Publish a hit event to the durable queue - the only durability
///    guarantee on the hot path; a publish failure is surfaced as a 500
/// 4. Mapping found: 307 redirect to the destination with `click_id`
///    appended; no mapping: 200 with the recorded hit event as JSON
///
/// The handler never waits for persistence; the worker picks the event up
/// from the queue later.
///
/// # Errors
///
/// Returns 400 when `click_id` is missing, 500 when the store read or the
/// queue publish fails. The request is never retried here.
pub async fn redirect_handler(
    Path(hash): Path<String>,
    Query(params): Query<RedirectParams>,
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let Some(click_id) = params.click_id.filter(|c| !c.is_empty()) else {
        return Err(AppError::bad_request(
            "Missing click_id parameter",
            serde_json::json!({}),
        ));
    };

    let request_url = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let destination = state.mappings.resolve(&hash).await?;

    let event = HitEvent::new(
        addr.ip().to_string(),
        request_url,
        "GET".to_string(),
        serialize_headers(&headers),
    );

    // Publish must complete before responding; hits are never dropped
    // silently on the hot path.
    state.queue.publish(&event).await?;

    match destination {
        Some(destination_url) => {
            let target = append_click_id(&destination_url, &click_id);
            debug!(hash, target, "Redirecting");
            Ok(Redirect::temporary(&target).into_response())
        }
        None => {
            debug!(hash, "No mapping found, echoing hit event");
            Ok(Json(event).into_response())
        }
    }
}

/// Rejects requests that carry no hash segment at all.
///
/// # Endpoint
///
/// `GET /`
pub async fn missing_hash_handler() -> AppError {
    AppError::bad_request("Missing hash in URL path", serde_json::json!({}))
}

/// Serializes request headers into a JSON object string.
///
/// Multi-valued headers keep their first value; non-UTF-8 values are
/// skipped. A `BTreeMap` keeps the serialized form deterministic.
fn serialize_headers(headers: &HeaderMap) -> String {
    let map: BTreeMap<&str, &str> = headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str(), v)))
        .collect();

    serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
}

/// Appends the correlation token to the destination URL.
fn append_click_id(destination_url: &str, click_id: &str) -> String {
    let separator = if destination_url.contains('?') { '&' } else { '?' };
    format!("{destination_url}{separator}click_id={click_id}")
}
