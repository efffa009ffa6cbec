//! Business logic services orchestrating domain operations.

pub mod hash_allocator;
pub mod mapping_service;

pub use hash_allocator::HashAllocator;
pub use mapping_service::MappingService;
