//! Data access trait definitions implemented by the infrastructure layer.

pub mod hit_repository;
pub mod mapping_repository;
pub mod redirect_history_repository;

pub use hit_repository::HitRepository;
pub use mapping_repository::MappingRepository;
pub use redirect_history_repository::RedirectHistoryRepository;

#[cfg(test)]
pub use hit_repository::MockHitRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
#[cfg(test)]
pub use redirect_history_repository::MockRedirectHistoryRepository;
