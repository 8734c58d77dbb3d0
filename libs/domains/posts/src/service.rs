use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{PostError, PostResult};
use crate::models::{CreatePost, Post, PostFilter, PostQuery, UpdatePost, is_valid_slug};
use crate::repository::PostRepository;

/// Service layer for blog posts. Drafts are visible to admins only.
#[derive(Clone)]
pub struct PostService<R: PostRepository> {
    repository: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_posts(&self, filter: PostFilter, is_admin: bool) -> PostResult<Vec<Post>> {
        self.repository
            .list(PostQuery::new(filter, !is_admin))
            .await
    }

    pub async fn get_post(&self, slug: &str, is_admin: bool) -> PostResult<Post> {
        if !is_valid_slug(slug) {
            return Err(PostError::NotFound(slug.to_string()));
        }

        self.repository
            .get_by_slug(slug)
            .await?
            .filter(|post| is_admin || post.published)
            .ok_or_else(|| PostError::NotFound(slug.to_string()))
    }

    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create_post(&self, input: CreatePost) -> PostResult<Post> {
        input.validate()?;
        self.repository.create(Post::new(input)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_post(&self, slug: &str, input: UpdatePost) -> PostResult<Post> {
        input.validate()?;

        let mut post = self.get_post(slug, true).await?;
        post.apply_update(input);

        self.repository.update(post).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, slug: &str) -> PostResult<()> {
        if !self.repository.delete(slug).await? {
            return Err(PostError::NotFound(slug.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryPostRepository, MockPostRepository};

    fn create(slug: &str, published: bool) -> CreatePost {
        CreatePost {
            slug: slug.to_string(),
            title: "Welcome".to_string(),
            summary: "First post".to_string(),
            body: "# Hello".to_string(),
            author: "Board".to_string(),
            tags: vec![],
            published,
        }
    }

    #[tokio::test]
    async fn test_drafts_hidden_from_public() {
        let service = PostService::new(InMemoryPostRepository::new());
        service.create_post(create("draft", false)).await.unwrap();

        assert!(matches!(
            service.get_post("draft", false).await,
            Err(PostError::NotFound(_))
        ));
        assert!(service.get_post("draft", true).await.is_ok());

        assert!(service.list_posts(PostFilter::default(), false).await.unwrap().is_empty());
        assert_eq!(service.list_posts(PostFilter::default(), true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let mut mock = MockPostRepository::new();
        mock.expect_create().never();
        mock.expect_get_by_slug().never();

        let service = PostService::new(mock);
        assert!(matches!(
            service.create_post(create("Not A Slug", true)).await,
            Err(PostError::InvalidInput(_))
        ));
        assert!(matches!(
            service.get_post("../etc/passwd", true).await,
            Err(PostError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_publishes_draft() {
        let service = PostService::new(InMemoryPostRepository::new());
        service.create_post(create("draft", false)).await.unwrap();

        let updated = service
            .update_post(
                "draft",
                UpdatePost {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.published);
        assert!(updated.published_at.is_some());
        assert!(service.get_post("draft", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let service = PostService::new(InMemoryPostRepository::new());
        assert!(matches!(
            service.delete_post("nope").await,
            Err(PostError::NotFound(_))
        ));
    }
}
