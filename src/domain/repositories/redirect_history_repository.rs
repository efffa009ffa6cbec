//! Repository trait for redirect-history records.

use crate::domain::entities::{NewRedirectRecord, RedirectRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the redirect-history write path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRedirectHistoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectHistoryRepository: Send + Sync {
    /// Persists a redirect-history record referencing an existing hit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, record: NewRedirectRecord) -> Result<RedirectRecord, AppError>;
}
