//! Persistence worker consuming the durable hit queue.

pub mod hit_worker;

pub use hit_worker::{HitWorker, HitWorkerConfig, process_hit};
