use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// OpenAPI tag for the gallery routes
pub const TAG: &str = "gallery";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    pub image_url: String,
    pub event_id: Option<Uuid>,
    pub taken_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Photo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            caption: model.caption,
            image_url: model.image_url,
            event_id: model.event_id,
            taken_at: model.taken_at.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Photo> for ActiveModel {
    fn from(photo: crate::models::Photo) -> Self {
        ActiveModel {
            id: Set(photo.id),
            title: Set(photo.title),
            caption: Set(photo.caption),
            image_url: Set(photo.image_url),
            event_id: Set(photo.event_id),
            taken_at: Set(photo.taken_at.map(Into::into)),
            created_at: Set(photo.created_at.into()),
        }
    }
}
