//! PostgreSQL implementations of the domain repository traits.

pub mod pg_hit_repository;
pub mod pg_mapping_repository;
pub mod pg_redirect_history_repository;

pub use pg_hit_repository::PgHitRepository;
pub use pg_mapping_repository::PgMappingRepository;
pub use pg_redirect_history_repository::PgRedirectHistoryRepository;
