//! Shared utility functions.

pub mod extract_hash;
pub mod hash;
