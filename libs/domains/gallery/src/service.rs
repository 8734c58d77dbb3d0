use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{GalleryError, GalleryResult};
use crate::models::{CreatePhoto, Photo, PhotoFilter};
use crate::repository::PhotoRepository;

#[derive(Clone)]
pub struct GalleryService<R: PhotoRepository> {
    repository: Arc<R>,
}

impl<R: PhotoRepository> GalleryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_photos(&self, mut filter: PhotoFilter) -> GalleryResult<Vec<Photo>> {
        filter.limit = filter.limit.min(200);
        self.repository.list(filter).await
    }

    pub async fn get_photo(&self, id: Uuid) -> GalleryResult<Photo> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(GalleryError::NotFound(id))
    }

    pub async fn add_photo(&self, input: CreatePhoto) -> GalleryResult<Photo> {
        input.validate()?;
        self.repository.create(Photo::new(input)).await
    }

    pub async fn delete_photo(&self, id: Uuid) -> GalleryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(GalleryError::NotFound(id));
        }
        Ok(())
    }
}
