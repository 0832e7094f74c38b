use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use aviary_core::{Bird, BirdId, UserId};

use super::r#trait::{BirdStore, StoreError};

/// In-memory bird store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryBirdStore {
    records: RwLock<HashMap<BirdId, Bird>>,
}

impl InMemoryBirdStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(&self, keep: impl Fn(&Bird) -> bool) -> Result<Vec<Bird>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Unavailable)?;
        let mut birds: Vec<Bird> = records.values().filter(|b| keep(b)).cloned().collect();
        birds.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(birds)
    }
}

#[async_trait]
impl BirdStore for InMemoryBirdStore {
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Bird>, StoreError> {
        self.collect_sorted(|b| b.owner == owner)
    }

    async fn find_all(&self) -> Result<Vec<Bird>, StoreError> {
        self.collect_sorted(|_| true)
    }

    async fn find_by_id(&self, id: BirdId) -> Result<Option<Bird>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Unavailable)?;
        Ok(records.get(&id).cloned())
    }

    async fn insert(&self, bird: &Bird) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Unavailable)?;
        if records.contains_key(&bird.id) {
            return Err(StoreError::Backend(format!("duplicate id {}", bird.id)));
        }
        records.insert(bird.id, bird.clone());
        Ok(())
    }

    async fn update(&self, bird: &Bird) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Unavailable)?;
        records.insert(bird.id, bird.clone());
        Ok(())
    }

    async fn delete(&self, id: BirdId) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Unavailable)?;
        records.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::NewBird;
    use chrono::{Duration, Utc};

    fn bird(owner: UserId, name: &str, offset_secs: i64) -> Bird {
        let new = NewBird {
            name: name.to_string(),
            species: "Turdus merula".to_string(),
            location: "Berlin".to_string(),
            image: "http://x/blackbird.png".to_string(),
        };
        Bird::create(new, owner, Utc::now() + Duration::seconds(offset_secs))
    }

    #[tokio::test]
    async fn owner_filter_and_full_scan() {
        let store = InMemoryBirdStore::new();
        let alice = UserId::new();
        let bob = UserId::new();

        store.insert(&bird(alice, "a1", 0)).await.unwrap();
        store.insert(&bird(bob, "b1", 1)).await.unwrap();
        store.insert(&bird(alice, "a2", 2)).await.unwrap();

        let mine: Vec<String> = store
            .find_by_owner(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(mine, vec!["a1", "a2"]);

        let all: Vec<String> = store.find_all().await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(all, vec!["a1", "b1", "a2"]);
    }

    #[tokio::test]
    async fn update_replaces_and_delete_removes() {
        let store = InMemoryBirdStore::new();
        let mut b = bird(UserId::new(), "Blackbird", 0);
        store.insert(&b).await.unwrap();

        b.location = "Paris".to_string();
        store.update(&b).await.unwrap();
        assert_eq!(store.find_by_id(b.id).await.unwrap().unwrap().location, "Paris");

        store.delete(b.id).await.unwrap();
        assert!(store.find_by_id(b.id).await.unwrap().is_none());

        // Deleting again is a no-op.
        store.delete(b.id).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryBirdStore::new();
        let b = bird(UserId::new(), "Wren", 0);
        store.insert(&b).await.unwrap();
        assert!(matches!(store.insert(&b).await, Err(StoreError::Backend(_))));
    }
}
