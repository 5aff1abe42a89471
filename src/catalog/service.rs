use std::sync::Arc;
use thiserror::Error;

use super::models::{Genre, Track, TrackRequest};
use super::repository::TrackStore;
use super::validation::{TrackValidationError, validate_new_track, validate_patch};
use crate::db::StoreError;

/// Maximum number of items returned by `newest_podcast_episodes`
pub const NEW_EPISODES_LIMIT: i64 = 10;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] TrackValidationError),

    #[error("Track {0} not found")]
    NotFound(i64),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Validates catalog input and executes it against a `TrackStore`
pub struct CatalogService {
    store: Arc<dyn TrackStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    /// Create a track; every field is required
    pub async fn create(&self, req: TrackRequest) -> Result<i64, CatalogError> {
        let track = validate_new_track(req)?;
        let id = self.store.insert(&track).await?;
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Track>, CatalogError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Track, CatalogError> {
        self.store
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Partial update: only supplied fields change
    pub async fn update(&self, id: i64, req: TrackRequest) -> Result<(), CatalogError> {
        let patch = validate_patch(req)?;
        if self.store.update(id, &patch).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(id))
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(id))
        }
    }

    /// Up to ten podcast episodes, newest release first
    pub async fn newest_podcast_episodes(&self) -> Result<Vec<Track>, CatalogError> {
        Ok(self
            .store
            .latest_by_genre(Genre::Podcast, NEW_EPISODES_LIMIT)
            .await?)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
