//! Bird record persistence.

pub mod in_memory;
pub mod postgres;
mod r#trait;

pub use in_memory::InMemoryBirdStore;
pub use postgres::PostgresBirdStore;
pub use r#trait::{BirdStore, StoreError};
