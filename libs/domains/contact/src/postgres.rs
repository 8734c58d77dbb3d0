use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity::{Column, Entity};
use crate::error::ContactResult;
use crate::models::{ContactFilter, ContactMessage};
use crate::repository::ContactRepository;

pub struct PgContactRepository {
    base: BaseRepository<Entity>,
}

impl PgContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, message: ContactMessage) -> ContactResult<ContactMessage> {
        let model = self.base.insert(message.into()).await?;
        Ok(model.into())
    }

    async fn list(&self, filter: ContactFilter) -> ContactResult<Vec<ContactMessage>> {
        let mut select = Entity::find();
        if let Some(resolved) = filter.resolved {
            select = select.filter(Column::Resolved.eq(resolved));
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

    async fn mark_resolved(&self, id: Uuid) -> ContactResult<Option<ContactMessage>> {
        let result = Entity::update_many()
            .col_expr(Column::Resolved, Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> ContactResult<bool> {
        Ok(self.base.delete_by_id(id).await? > 0)
    }
}
