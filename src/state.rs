//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::queue::HitQueue;

/// Application state for the gateway process.
///
/// All dependencies are injected through constructors (no globals), so tests
/// can swap in mocks and in-memory implementations freely.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    pub mappings: Arc<dyn MappingRepository>,
    pub queue: Arc<dyn HitQueue>,
    /// Static bearer token required by the management API.
    pub api_token: String,
}

impl AppState {
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        queue: Arc<dyn HitQueue>,
        api_token: String,
    ) -> Self {
        let mapping_service = Arc::new(MappingService::new(mappings.clone()));
        Self {
            mapping_service,
            mappings,
            queue,
            api_token,
        }
    }
}
