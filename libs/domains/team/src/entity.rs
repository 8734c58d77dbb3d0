use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// OpenAPI tag for the team routes
pub const TAG: &str = "team";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub position: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::TeamMember {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            position: model.position,
            bio: model.bio,
            photo_url: model.photo_url,
            email: model.email,
            display_order: model.display_order,
            active: model.active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::TeamMember> for ActiveModel {
    fn from(member: crate::models::TeamMember) -> Self {
        ActiveModel {
            id: Set(member.id),
            name: Set(member.name),
            position: Set(member.position),
            bio: Set(member.bio),
            photo_url: Set(member.photo_url),
            email: Set(member.email),
            display_order: Set(member.display_order),
            active: Set(member.active),
            created_at: Set(member.created_at.into()),
            updated_at: Set(member.updated_at.into()),
        }
    }
}
