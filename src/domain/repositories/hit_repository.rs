//! Repository trait for persisted hit records.

use crate::domain::entities::{Hit, NewHit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the hit write path.
///
/// Only the persistence worker writes hits; the resolver owns no durable
/// state.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Persists a hit record and returns it with its generated identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. A failure here
    /// fails the whole handling of the queue message.
    async fn save(&self, new_hit: NewHit) -> Result<Hit, AppError>;
}
