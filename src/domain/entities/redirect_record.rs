//! Redirect-history entity derived from a resolvable hit.

use chrono::{DateTime, Utc};

/// A persisted redirect-history record.
///
/// Created by the worker only when a hit's hash resolves to a mapping;
/// one-to-one with such hits. References the hit record it was derived from.
#[derive(Debug, Clone)]
pub struct RedirectRecord {
    pub id: i64,
    pub hit_id: i64,
    pub original_url: String,
    pub redirect_url: String,
    /// Classification tag derived from the destination domain.
    pub redirect_type: String,
    pub redirect_status: i32,
    pub redirect_timestamp: DateTime<Utc>,
}

/// Input data for persisting a redirect-history record.
#[derive(Debug, Clone)]
pub struct NewRedirectRecord {
    pub hit_id: i64,
    pub original_url: String,
    pub redirect_url: String,
    pub redirect_type: String,
    pub redirect_status: i32,
    pub redirect_timestamp: DateTime<Utc>,
}
