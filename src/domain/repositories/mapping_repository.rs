//! Repository trait for hash to destination URL mappings.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing mappings.
///
/// Shared by the resolver hot path (read-only), the worker (authoritative
/// re-resolution) and the management API (create/list/update).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Resolves a hash to its destination URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if a mapping exists
    /// - `Ok(None)` if not found (absence is not an error)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve(&self, hash: &str) -> Result<Option<String>, AppError>;

    /// Returns whether a hash is already taken.
    ///
    /// Used by the allocator's uniqueness check. Store errors surface to the
    /// caller instead of being treated as "try again".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn hash_exists(&self, hash: &str) -> Result<bool, AppError>;

    /// Creates a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash already exists (the unique
    /// index is the last line of defense against allocator races).
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, AppError>;

    /// Lists mappings belonging to an owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Mapping>, AppError>;

    /// Replaces the destination URL of an owner's mapping.
    ///
    /// The hash itself is immutable; only the destination may change, and
    /// only for a mapping the owner actually holds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the mapping does not exist or
    /// belongs to a different owner. Returns [`AppError::Internal`] on
    /// database errors.
    async fn update_destination(
        &self,
        id: i64,
        owner_id: i64,
        destination_url: &str,
    ) -> Result<Mapping, AppError>;
}
