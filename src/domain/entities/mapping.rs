//! Mapping entity representing a short hash to destination URL binding.

use chrono::{DateTime, Utc};

/// A durable binding between a short hash and a destination URL.
///
/// The `hash` is globally unique and immutable once assigned. Only the
/// destination URL may change, and only through the owner-facing management
/// API. Mappings are never deleted by the core pipeline.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub id: i64,
    /// Owner identity. A mapping without an owner is invisible to the
    /// management API but still resolvable on the hot path.
    pub owner_id: Option<i64>,
    pub hash: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(
        id: i64,
        owner_id: Option<i64>,
        hash: String,
        destination_url: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            hash,
            destination_url,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new mapping.
///
/// The `hash` must come from the allocator so uniqueness has already been
/// checked against the store.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub owner_id: Option<i64>,
    pub hash: String,
    pub destination_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = Mapping::new(
            1,
            Some(42),
            "abc123".to_string(),
            "http://site1.com/offer".to_string(),
            now,
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.owner_id, Some(42));
        assert_eq!(mapping.hash, "abc123");
        assert_eq!(mapping.destination_url, "http://site1.com/offer");
    }

    #[test]
    fn test_mapping_without_owner() {
        let now = Utc::now();
        let mapping = Mapping::new(
            2,
            None,
            "seeded".to_string(),
            "http://site2.com/".to_string(),
            now,
            now,
        );

        assert!(mapping.owner_id.is_none());
    }
}
