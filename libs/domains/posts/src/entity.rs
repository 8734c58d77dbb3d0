use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// OpenAPI tag for the post routes
pub const TAG: &str = "posts";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author: String,
    pub tags: Json,
    pub published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Post {
    fn from(model: Model) -> Self {
        let tags: Vec<String> = serde_json::from_value(model.tags).unwrap_or_default();

        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            summary: model.summary,
            body: model.body,
            author: model.author,
            tags,
            published: model.published,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Post> for ActiveModel {
    fn from(post: crate::models::Post) -> Self {
        ActiveModel {
            id: Set(post.id),
            slug: Set(post.slug),
            title: Set(post.title),
            summary: Set(post.summary),
            body: Set(post.body),
            author: Set(post.author),
            tags: Set(Json::from(post.tags)),
            published: Set(post.published),
            published_at: Set(post.published_at.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
