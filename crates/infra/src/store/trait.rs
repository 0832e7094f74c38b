use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use aviary_core::{Bird, BirdId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing database reported a failure (connection, query, constraint).
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored document could not be decoded back into a record.
    #[error("corrupt document: {0}")]
    Corrupt(String),

    /// The store cannot serve requests (e.g. a poisoned in-memory lock).
    #[error("store unavailable")]
    Unavailable,
}

/// Document store for bird records.
///
/// Implementations hold no per-request state. Writes are last-writer-wins:
/// `update` replaces whatever document is stored under the record's id, with
/// no version check between a caller's lookup and its write.
#[async_trait]
pub trait BirdStore: Send + Sync {
    /// Every record owned by `owner`, oldest first.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Bird>, StoreError>;

    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<Bird>, StoreError>;

    async fn find_by_id(&self, id: BirdId) -> Result<Option<Bird>, StoreError>;

    async fn insert(&self, bird: &Bird) -> Result<(), StoreError>;

    /// Replace the stored document for `bird.id`.
    async fn update(&self, bird: &Bird) -> Result<(), StoreError>;

    /// Remove the record. Deleting an id that is already gone is not an error.
    async fn delete(&self, id: BirdId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> BirdStore for Arc<S>
where
    S: BirdStore + ?Sized,
{
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Bird>, StoreError> {
        (**self).find_by_owner(owner).await
    }

    async fn find_all(&self) -> Result<Vec<Bird>, StoreError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: BirdId) -> Result<Option<Bird>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, bird: &Bird) -> Result<(), StoreError> {
        (**self).insert(bird).await
    }

    async fn update(&self, bird: &Bird) -> Result<(), StoreError> {
        (**self).update(bird).await
    }

    async fn delete(&self, id: BirdId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
