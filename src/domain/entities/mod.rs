//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic, following the
//! "New Type" pattern with separate structs for creation: [`NewMapping`],
//! [`NewHit`], [`NewRedirectRecord`].

pub mod hit;
pub mod mapping;
pub mod redirect_record;

pub use hit::{Hit, NewHit};
pub use mapping::{Mapping, NewMapping};
pub use redirect_record::{NewRedirectRecord, RedirectRecord};
