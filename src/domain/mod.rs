//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`hit_event`] - The queued hit event model
//! - [`classify`] - Destination classification for redirect history
//!
//! # Hit Processing Flow
//!
//! 1. The redirect resolver receives a `GET /{hash}` request
//! 2. A [`hit_event::HitEvent`] is published to the durable queue
//! 3. The persistence worker claims the message and persists a
//!    [`entities::Hit`]
//! 4. When the hit's hash resolves, a [`entities::RedirectRecord`] is derived
//!    with a [`classify::Classifier`] tag

pub mod classify;
pub mod entities;
pub mod hit_event;
pub mod repositories;
