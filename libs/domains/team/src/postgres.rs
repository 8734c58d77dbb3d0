use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entity::{Column, Entity};
use crate::error::{TeamError, TeamResult};
use crate::models::TeamMember;
use crate::repository::TeamRepository;

pub struct PgTeamRepository {
    base: BaseRepository<Entity>,
}

impl PgTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create(&self, member: TeamMember) -> TeamResult<TeamMember> {
        let model = self.base.insert(member.into()).await?;
        tracing::info!(member_id = %model.id, "Created team member");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> TeamResult<Option<TeamMember>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list(&self, active_only: bool) -> TeamResult<Vec<TeamMember>> {
        let mut select = Entity::find();
        if active_only {
            select = select.filter(Column::Active.eq(true));
        }

        let models = select
            .order_by_asc(Column::DisplayOrder)
            .order_by_asc(Column::Name)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, member: TeamMember) -> TeamResult<TeamMember> {
        let id = member.id;
        let model = self.base.update(member.into()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TeamError::NotFound(id),
            other => other.into(),
        })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> TeamResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}
