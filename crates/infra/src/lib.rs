//! Infrastructure layer: persistence collaborators for bird records.

pub mod store;

pub use store::{BirdStore, InMemoryBirdStore, PostgresBirdStore, StoreError};
