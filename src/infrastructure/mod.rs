//! Infrastructure layer: database access and the durable hit queue.

pub mod persistence;
pub mod queue;
