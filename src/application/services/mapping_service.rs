//! Mapping creation and retrieval service.

use std::sync::Arc;

use crate::application::services::HashAllocator;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Service for creating and listing hash mappings.
///
/// Destination URLs are validated and hashes are minted by the
/// [`HashAllocator`] so callers never pick their own short codes.
pub struct MappingService {
    mappings: Arc<dyn MappingRepository>,
    allocator: HashAllocator,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(mappings: Arc<dyn MappingRepository>) -> Self {
        let allocator = HashAllocator::new(mappings.clone());
        Self {
            mappings,
            allocator,
        }
    }

    /// Creates a mapping for an owner, minting a fresh unique hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the destination is not an
    /// absolute http(s) URL. Returns [`AppError::Internal`] on store or
    /// allocation failures.
    pub async fn create_mapping(
        &self,
        owner_id: i64,
        destination_url: String,
    ) -> Result<Mapping, AppError> {
        validate_destination(&destination_url)?;

        let hash = self.allocator.allocate().await?;

        self.mappings
            .create(NewMapping {
                owner_id: Some(owner_id),
                hash,
                destination_url,
            })
            .await
    }

    /// Lists mappings belonging to an owner, newest first.
    ///
    /// Ownerless mappings are not reachable here; they stay resolvable on
    /// the hot path only.
    pub async fn list_mappings(&self, owner_id: i64) -> Result<Vec<Mapping>, AppError> {
        self.mappings.list_by_owner(owner_id).await
    }

    /// Replaces the destination of a mapping the owner holds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a bad URL, [`AppError::NotFound`]
    /// when the mapping does not exist or belongs to someone else.
    pub async fn update_mapping(
        &self,
        id: i64,
        owner_id: i64,
        destination_url: String,
    ) -> Result<Mapping, AppError> {
        validate_destination(&destination_url)?;

        self.mappings
            .update_destination(id, owner_id, &destination_url)
            .await
    }
}

fn validate_destination(destination_url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(destination_url).map_err(|e| {
        AppError::bad_request(
            "Invalid destination URL",
            json!({ "reason": e.to_string() }),
        )
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Destination URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
