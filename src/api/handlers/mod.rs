//! HTTP request handlers for API endpoints.

pub mod health;
pub mod mappings;
pub mod redirect;

pub use health::health_handler;
pub use mappings::{create_mapping_handler, list_mappings_handler, update_mapping_handler};
pub use redirect::{missing_hash_handler, redirect_handler};
