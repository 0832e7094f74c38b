//! Service object behind the bird routes.
//!
//! `BirdService` is built once at startup around a store handle and shared
//! with handlers through an axum `Extension`. Every operation is a straight
//! pipeline of fallible steps; the first failure is returned as-is.
//!
//! Update and delete do a lookup ([`BirdService::owned_by`]) followed by a
//! write with nothing in between to stop a concurrent request from writing
//! first. Two overlapping updates of the same record are last-writer-wins.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::instrument;

use aviary_core::{
    Bird, BirdChanges, BirdId, NewBird, OWNER_FIELD, UserId, require_ownership, resolve_or_404,
};
use aviary_infra::{BirdStore, InMemoryBirdStore, PostgresBirdStore};

use crate::app::errors::ApiError;
use crate::config::ApiConfig;

#[derive(Clone)]
pub struct BirdService {
    store: Arc<dyn BirdStore>,
}

impl BirdService {
    pub fn new(store: Arc<dyn BirdStore>) -> Self {
        Self { store }
    }

    /// Service over a fresh in-memory store (dev/tests).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBirdStore::new()))
    }

    /// Records owned by `caller`.
    #[instrument(skip_all, fields(caller = %caller))]
    pub async fn list_mine(&self, caller: UserId) -> Result<Vec<Bird>, ApiError> {
        Ok(self.store.find_by_owner(caller).await?)
    }

    /// Every record. The caller only has to be authenticated.
    #[instrument(skip_all)]
    pub async fn list_all(&self) -> Result<Vec<Bird>, ApiError> {
        Ok(self.store.find_all().await?)
    }

    /// One record by id, whoever owns it.
    #[instrument(skip_all, fields(bird_id = %id))]
    pub async fn get_one(&self, id: BirdId) -> Result<Bird, ApiError> {
        let bird = resolve_or_404(self.store.find_by_id(id).await?)?;
        Ok(bird)
    }

    /// Validate and persist a new record owned by `caller`.
    ///
    /// Any `owner` in the payload is ignored.
    #[instrument(skip_all, fields(caller = %caller))]
    pub async fn create(&self, caller: UserId, payload: &Map<String, Value>) -> Result<Bird, ApiError> {
        let new = NewBird::from_payload(payload)?;
        let bird = Bird::create(new, caller, Utc::now());
        self.store.insert(&bird).await?;

        tracing::info!(bird_id = %bird.id, "bird created");
        Ok(bird)
    }

    /// Load a record `caller` is about to change.
    ///
    /// `NotFound` wins over `Forbidden`, and both are decided before the
    /// request body is looked at.
    #[instrument(skip_all, fields(bird_id = %id, caller = %caller))]
    pub async fn owned_by(&self, id: BirdId, caller: UserId) -> Result<Bird, ApiError> {
        let bird = resolve_or_404(self.store.find_by_id(id).await?)?;
        if let Err(e) = require_ownership(caller, &bird) {
            tracing::warn!(owner = %bird.owner, "rejected: caller is not the owner");
            return Err(e.into());
        }
        Ok(bird)
    }

    /// Apply a partial update to a record loaded with [`Self::owned_by`].
    ///
    /// `payload` must already have had blank fields removed. Any `owner` key
    /// is dropped. A payload with nothing left to change writes nothing.
    #[instrument(skip_all, fields(bird_id = %bird.id))]
    pub async fn update(&self, mut bird: Bird, mut payload: Map<String, Value>) -> Result<(), ApiError> {
        payload.remove(OWNER_FIELD);

        let changes = BirdChanges::from_payload(&payload)?;
        if changes.is_empty() {
            tracing::debug!("nothing to update");
            return Ok(());
        }
        bird.apply(changes, Utc::now());
        self.store.update(&bird).await?;

        tracing::info!("bird updated");
        Ok(())
    }

    /// Remove a record on behalf of `caller`.
    #[instrument(skip_all, fields(bird_id = %id, caller = %caller))]
    pub async fn delete(&self, id: BirdId, caller: UserId) -> Result<(), ApiError> {
        let bird = self.owned_by(id, caller).await?;
        self.store.delete(bird.id).await?;

        tracing::info!("bird deleted");
        Ok(())
    }
}

/// Pick the store from configuration: Postgres when a database URL is set,
/// otherwise in-memory.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<BirdService> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
        return Ok(BirdService::in_memory());
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .connect(url)
        .await?;

    let store = PostgresBirdStore::new(pool);
    store.ensure_schema().await?;

    tracing::info!("using postgres store");
    Ok(BirdService::new(Arc::new(store)))
}
