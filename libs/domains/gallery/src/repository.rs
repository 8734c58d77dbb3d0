use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::GalleryResult;
use crate::models::{Photo, PhotoFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, photo: Photo) -> GalleryResult<Photo>;

    async fn get_by_id(&self, id: Uuid) -> GalleryResult<Option<Photo>>;

    /// Newest first
    async fn list(&self, filter: PhotoFilter) -> GalleryResult<Vec<Photo>>;

    async fn delete(&self, id: Uuid) -> GalleryResult<bool>;
}

/// In-memory store. It does not know about events, so any `event_id` is accepted.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPhotoRepository {
    photos: Arc<RwLock<HashMap<Uuid, Photo>>>,
}

impl InMemoryPhotoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoRepository for InMemoryPhotoRepository {
    async fn create(&self, photo: Photo) -> GalleryResult<Photo> {
        let mut photos = self.photos.write().await;
        photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn get_by_id(&self, id: Uuid) -> GalleryResult<Option<Photo>> {
        let photos = self.photos.read().await;
        Ok(photos.get(&id).cloned())
    }

    async fn list(&self, filter: PhotoFilter) -> GalleryResult<Vec<Photo>> {
        let photos = self.photos.read().await;
        let mut result: Vec<Photo> = photos
            .values()
            .filter(|p| filter.event_id.is_none_or(|id| p.event_id == Some(id)))
            .cloned()
            .collect();

        // v7 ids break ties between photos created in the same instant
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> GalleryResult<bool> {
        let mut photos = self.photos.write().await;
        Ok(photos.remove(&id).is_some())
    }
}
