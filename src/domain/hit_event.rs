//! Hit event model for asynchronous hit ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The queue message describing one resolver invocation.
///
/// Published by the redirect resolver and consumed by the persistence worker.
/// Ephemeral: it exists only on the queue between publish and acknowledgment
/// and has no identity until persisted as a [`crate::domain::entities::Hit`].
///
/// # Wire Format
///
/// Serialized as JSON:
///
/// ```json
/// {
///   "timestamp": "2024-01-01T00:00:00Z",
///   "ip_address": "10.0.0.1",
///   "request_url": "/abc123?click_id=xyz",
///   "request_method": "GET",
///   "request_headers": "{\"host\":\"s.example.com\"}"
/// }
/// ```
///
/// `request_headers` is itself a JSON object serialized as a string so the
/// payload survives consumers that treat headers as an opaque blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitEvent {
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub request_url: String,
    pub request_method: String,
    pub request_headers: String,
}

impl HitEvent {
    /// Creates a hit event stamped with the current time.
    pub fn new(
        ip_address: String,
        request_url: String,
        request_method: String,
        request_headers: String,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            ip_address,
            request_url,
            request_method,
            request_headers,
        }
    }
}
