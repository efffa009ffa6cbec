//! Unique hash allocation against the mapping store.

use std::sync::Arc;

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::hash::generate_hash;
use serde_json::json;

/// Attempts before allocation gives up.
///
/// With a 62^6 value space a handful of draws is far more than enough; the
/// bound exists so a full keyspace or a misbehaving store produces an
/// explicit error rather than an infinite loop.
const MAX_ATTEMPTS: usize = 10;

/// Allocates collision-free short hashes.
///
/// Draws random 6-character hashes and checks each against the mapping store
/// until an unused value is found. Store errors during the check surface to
/// the caller instead of being retried silently.
pub struct HashAllocator {
    mappings: Arc<dyn MappingRepository>,
}

impl HashAllocator {
    pub fn new(mappings: Arc<dyn MappingRepository>) -> Self {
        Self { mappings }
    }

    /// Allocates a hash that is not present in the store at time of checking.
    ///
    /// The database's unique index remains the final arbiter against
    /// concurrent allocations of the same value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable or when
    /// [`MAX_ATTEMPTS`] draws all collided.
    pub async fn allocate(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ATTEMPTS {
            let hash = generate_hash();

            if !self.mappings.hash_exists(&hash).await? {
                return Ok(hash);
            }
        }

        Err(AppError::internal(
            "Hash allocation exhausted",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;

    #[tokio::test]
    async fn test_allocate_returns_first_free_hash() {
        let mut mock = MockMappingRepository::new();
        mock.expect_hash_exists().times(1).returning(|_| Ok(false));

        let allocator = HashAllocator::new(Arc::new(mock));
        let hash = allocator.allocate().await.unwrap();

        assert_eq!(hash.len(), 6);
        assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_allocate_retries_on_collision() {
        let mut mock = MockMappingRepository::new();
        let mut calls = 0;
        mock.expect_hash_exists().times(3).returning(move |_| {
            calls += 1;
            Ok(calls < 3)
        });

        let allocator = HashAllocator::new(Arc::new(mock));
        assert!(allocator.allocate().await.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_exhausts_after_bounded_attempts() {
        let mut mock = MockMappingRepository::new();
        mock.expect_hash_exists()
            .times(MAX_ATTEMPTS)
            .returning(|_| Ok(true));

        let allocator = HashAllocator::new(Arc::new(mock));
        let err = allocator.allocate().await.unwrap_err();

        assert!(err.to_string().contains("exhausted"));
    }

    #[tokio::test]
    async fn test_allocate_surfaces_store_errors() {
        let mut mock = MockMappingRepository::new();
        mock.expect_hash_exists().times(1).returning(|_| {
            Err(AppError::internal("Database error", serde_json::json!({})))
        });

        let allocator = HashAllocator::new(Arc::new(mock));
        assert!(allocator.allocate().await.is_err());
    }
}
