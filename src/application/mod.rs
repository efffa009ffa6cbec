//! Application layer: service orchestration over the domain.

pub mod services;
