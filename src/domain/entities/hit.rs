//! Hit entity representing one persisted resolver invocation.

use chrono::{DateTime, Utc};

/// A persisted hit record.
///
/// Carries the fields of the queued hit event plus a generated identity and a
/// processing status. Immutable after creation; redelivered messages may
/// produce duplicate rows (at-least-once semantics).
#[derive(Debug, Clone)]
pub struct Hit {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub request_url: String,
    pub request_method: String,
    /// Request headers as a serialized JSON object.
    pub request_headers: String,
    pub processing_status: String,
}

/// Input data for persisting a hit record.
#[derive(Debug, Clone)]
pub struct NewHit {
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub request_url: String,
    pub request_method: String,
    pub request_headers: String,
    pub processing_status: String,
}
