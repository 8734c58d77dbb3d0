use async_trait::async_trait;

use crate::error::{PostError, PostResult};
use crate::models::{Post, PostQuery};
use crate::repository::PostRepository;

/// Serves reads from `fallback` while `primary` is unavailable.
///
/// `primary` stays the system of record: writes go only to it and fail when
/// it is down. Successful writes are copied to `fallback`; a failed copy is
/// logged and does not fail the write.
pub struct FallbackPostRepository<P, F> {
    primary: P,
    fallback: F,
}

impl<P: PostRepository, F: PostRepository> FallbackPostRepository<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    async fn mirror_save(&self, post: &Post) {
        if let Err(e) = self.fallback.update(post.clone()).await {
            tracing::warn!(slug = %post.slug, error = %e, "Failed to mirror post to fallback store");
        }
    }
}

#[async_trait]
impl<P: PostRepository, F: PostRepository> PostRepository for FallbackPostRepository<P, F> {
    async fn create(&self, post: Post) -> PostResult<Post> {
        let created = self.primary.create(post).await?;
        self.mirror_save(&created).await;
        Ok(created)
    }

    async fn get_by_slug(&self, slug: &str) -> PostResult<Option<Post>> {
        match self.primary.get_by_slug(slug).await {
            Err(PostError::StoreUnavailable(reason)) => {
                tracing::warn!(slug, %reason, "Primary post store unavailable, reading fallback");
                self.fallback.get_by_slug(slug).await
            }
            other => other,
        }
    }

    async fn list(&self, query: PostQuery) -> PostResult<Vec<Post>> {
        match self.primary.list(query.clone()).await {
            Err(PostError::StoreUnavailable(reason)) => {
                tracing::warn!(%reason, "Primary post store unavailable, reading fallback");
                self.fallback.list(query).await
            }
            other => other,
        }
    }

    async fn update(&self, post: Post) -> PostResult<Post> {
        let updated = self.primary.update(post).await?;
        self.mirror_save(&updated).await;
        Ok(updated)
    }

    async fn delete(&self, slug: &str) -> PostResult<bool> {
        let deleted = self.primary.delete(slug).await?;
        if let Err(e) = self.fallback.delete(slug).await {
            tracing::warn!(slug, error = %e, "Failed to remove post from fallback store");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePost, PostFilter};
    use crate::repository::{InMemoryPostRepository, MockPostRepository};
    use crate::store::FilePostRepository;
    use test_utils::TestDir;

    fn post(slug: &str) -> Post {
        Post::new(CreatePost {
            slug: slug.to_string(),
            title: "Title".to_string(),
            summary: String::new(),
            body: "body".to_string(),
            author: "Board".to_string(),
            tags: vec![],
            published: true,
        })
    }

    fn unavailable() -> PostError {
        PostError::StoreUnavailable("connection refused".to_string())
    }

    fn down_primary() -> MockPostRepository {
        let mut primary = MockPostRepository::new();
        primary
            .expect_get_by_slug()
            .returning(|_| Err(unavailable()));
        primary.expect_list().returning(|_| Err(unavailable()));
        primary.expect_create().returning(|_| Err(unavailable()));
        primary.expect_update().returning(|_| Err(unavailable()));
        primary.expect_delete().returning(|_| Err(unavailable()));
        primary
    }

    #[tokio::test]
    async fn test_writes_are_mirrored() {
        let dir = TestDir::new("fallback-mirror");
        let repo = FallbackPostRepository::new(
            InMemoryPostRepository::new(),
            FilePostRepository::new(dir.path()),
        );

        let mut created = repo.create(post("mirrored")).await.unwrap();
        assert!(dir.path().join("mirrored.json").exists());

        created.title = "Edited".to_string();
        repo.update(created).await.unwrap();
        let copy = FilePostRepository::new(dir.path())
            .get_by_slug("mirrored")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(copy.title, "Edited");

        assert!(repo.delete("mirrored").await.unwrap());
        assert!(!dir.path().join("mirrored.json").exists());
    }

    #[tokio::test]
    async fn test_reads_fall_back_when_primary_is_down() {
        let dir = TestDir::new("fallback-read");
        let file = FilePostRepository::new(dir.path());
        file.create(post("cached")).await.unwrap();

        let repo = FallbackPostRepository::new(down_primary(), file);

        let one = repo.get_by_slug("cached").await.unwrap();
        assert_eq!(one.map(|p| p.slug), Some("cached".to_string()));

        let all = repo
            .list(PostQuery::new(PostFilter::default(), true))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_writes_fail_when_primary_is_down() {
        let dir = TestDir::new("fallback-write");
        let repo = FallbackPostRepository::new(down_primary(), FilePostRepository::new(dir.path()));

        let result = repo.create(post("new")).await;
        assert!(matches!(result, Err(PostError::StoreUnavailable(_))));
        assert!(!dir.path().join("new.json").exists());

        assert!(matches!(
            repo.delete("new").await,
            Err(PostError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_other_primary_errors_are_not_masked() {
        let dir = TestDir::new("fallback-errors");
        let mut primary = MockPostRepository::new();
        primary
            .expect_get_by_slug()
            .returning(|_| Err(PostError::Internal("syntax error".to_string())));

        let repo = FallbackPostRepository::new(primary, FilePostRepository::new(dir.path()));
        assert!(matches!(
            repo.get_by_slug("any").await,
            Err(PostError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_mirror_failure_does_not_fail_write() {
        let mut fallback = MockPostRepository::new();
        fallback
            .expect_update()
            .times(1)
            .returning(|_| Err(PostError::File(std::io::Error::other("read-only fs"))));

        let repo = FallbackPostRepository::new(InMemoryPostRepository::new(), fallback);
        let created = repo.create(post("kept")).await.unwrap();
        assert_eq!(created.slug, "kept");
    }
}
