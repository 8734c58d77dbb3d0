use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entity::{self, Column, Entity};
use crate::error::{PostError, PostResult};
use crate::models::{Post, PostQuery};
use crate::repository::PostRepository;

/// PostgreSQL implementation of PostRepository using SeaORM
pub struct PgPostRepository {
    base: BaseRepository<Entity>,
}

impl PgPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_model(&self, slug: &str) -> PostResult<Option<entity::Model>> {
        let model = Entity::find()
            .filter(Column::Slug.eq(slug))
            .one(self.base.db())
            .await?;
        Ok(model)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, post: Post) -> PostResult<Post> {
        let slug = post.slug.clone();
        let model = self
            .base
            .insert(post.into())
            .await
            .map_err(|e| PostError::from_insert(e, &slug))?;

        tracing::info!(post_id = %model.id, slug = %model.slug, "Created post");
        Ok(model.into())
    }

    async fn get_by_slug(&self, slug: &str) -> PostResult<Option<Post>> {
        Ok(self.find_model(slug).await?.map(Into::into))
    }

    async fn list(&self, query: PostQuery) -> PostResult<Vec<Post>> {
        let mut select = Entity::find();

        if query.published_only {
            select = select.filter(Column::Published.eq(true));
        }

        if let Some(tag) = &query.tag {
            select = select.filter(Expr::cust_with_values(
                "tags::jsonb @> $1::jsonb",
                [serde_json::json!([tag])],
            ));
        }

        let models = select
            .order_by_with_nulls(Column::PublishedAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(Column::CreatedAt)
            .limit(query.limit)
            .offset(query.offset)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, post: Post) -> PostResult<Post> {
        let slug = post.slug.clone();
        let model = self.base.update(post.into()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => PostError::NotFound(slug),
            other => other.into(),
        })?;
        Ok(model.into())
    }

    async fn delete(&self, slug: &str) -> PostResult<bool> {
        let result = Entity::delete_many()
            .filter(Column::Slug.eq(slug))
            .exec(self.base.db())
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};
    use uuid::Uuid;

    fn model(slug: &str) -> entity::Model {
        let now = Utc::now().into();
        entity::Model {
            id: Uuid::now_v7(),
            slug: slug.to_string(),
            title: "Welcome".to_string(),
            summary: String::new(),
            body: "# Hi".to_string(),
            author: "Board".to_string(),
            tags: serde_json::json!(["news"]),
            published: true,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_by_slug_maps_tags() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("welcome")]])
            .into_connection();

        let post = PgPostRepository::new(db)
            .get_by_slug("welcome")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.tags, vec!["news".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert!(!PgPostRepository::new(db).delete("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_connection_failure_is_unavailable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal("refused".to_string()))])
            .into_connection();

        let result = PgPostRepository::new(db).list(PostQuery::public()).await;
        assert!(matches!(result, Err(PostError::StoreUnavailable(_))));
    }
}
