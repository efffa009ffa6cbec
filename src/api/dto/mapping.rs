//! DTOs for the mapping management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Mapping;

/// Request to create a new mapping.
///
/// The short hash is always minted server-side by the allocator.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMappingRequest {
    /// Destination URL the minted hash will redirect to.
    #[validate(url(message = "Invalid URL format"))]
    pub destination_url: String,

    /// Owner identity the mapping is created under.
    #[validate(range(min = 1))]
    pub owner_id: i64,
}

/// Request to replace a mapping's destination URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMappingRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub destination_url: String,

    #[validate(range(min = 1))]
    pub owner_id: i64,
}

/// A mapping as returned by the management API.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub id: i64,
    pub hash: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mapping> for MappingResponse {
    fn from(mapping: Mapping) -> Self {
        Self {
            id: mapping.id,
            hash: mapping.hash,
            destination_url: mapping.destination_url,
            created_at: mapping.created_at,
            updated_at: mapping.updated_at,
        }
    }
}
