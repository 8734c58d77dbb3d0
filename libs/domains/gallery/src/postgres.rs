use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity::{Column, Entity};
use crate::error::{GalleryError, GalleryResult};
use crate::models::{Photo, PhotoFilter};
use crate::repository::PhotoRepository;

pub struct PgPhotoRepository {
    base: BaseRepository<Entity>,
}

impl PgPhotoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn create(&self, photo: Photo) -> GalleryResult<Photo> {
        let event_id = photo.event_id;
        let model = self
            .base
            .insert(photo.into())
            .await
            .map_err(|e| GalleryError::from_insert(e, event_id))?;

        tracing::info!(photo_id = %model.id, "Added photo");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> GalleryResult<Option<Photo>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list(&self, filter: PhotoFilter) -> GalleryResult<Vec<Photo>> {
        let mut select = Entity::find();
        if let Some(event_id) = filter.event_id {
            select = select.filter(Column::EventId.eq(event_id));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> GalleryResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}
