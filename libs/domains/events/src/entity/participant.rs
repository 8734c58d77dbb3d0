use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub external_id: Option<String>,
    pub program: String,
    pub year: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registration::Entity")]
    Registration,
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Participant {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            external_id: model.external_id,
            program: model.program,
            year: model.year,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Participant> for ActiveModel {
    fn from(participant: crate::models::Participant) -> Self {
        ActiveModel {
            id: Set(participant.id),
            name: Set(participant.name),
            email: Set(participant.email),
            external_id: Set(participant.external_id),
            program: Set(participant.program),
            year: Set(participant.year),
            created_at: Set(participant.created_at.into()),
        }
    }
}
