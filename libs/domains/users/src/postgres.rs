use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::user;
use crate::error::{UserError, UserResult};
use crate::models::{User, normalize_email};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
pub struct PgUserRepository {
    base: BaseRepository<user::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let model = self
            .base
            .insert(user.into())
            .await
            .map_err(|e| UserError::from_insert(e, &email))?;

        tracing::info!(user_id = %model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let model = self.base.update(user.into()).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => UserError::NotFound(id),
            other => other.into(),
        })?;
        Ok(model.into())
    }
}
