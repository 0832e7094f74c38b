//! `aviary-core`: domain foundation for bird records.
//!
//! This crate contains **pure domain** logic (no infrastructure concerns):
//! the record schema, ownership checks and payload sanitising.

pub mod bird;
pub mod entity;
pub mod error;
pub mod guard;
pub mod id;
pub mod sanitize;

pub use bird::{BIRD_FIELDS, Bird, BirdChanges, NewBird, OWNER_FIELD};
pub use entity::Owned;
pub use error::{DomainError, DomainResult, ValidationError};
pub use guard::{require_ownership, resolve_or_404};
pub use id::{BirdId, UserId};
pub use sanitize::remove_blanks;
