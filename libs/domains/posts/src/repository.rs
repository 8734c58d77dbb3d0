use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PostError, PostResult};
use crate::models::{Post, PostQuery};

/// Repository trait for Post persistence, keyed by slug
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fails with `DuplicateSlug` when the slug is taken
    async fn create(&self, post: Post) -> PostResult<Post>;

    async fn get_by_slug(&self, slug: &str) -> PostResult<Option<Post>>;

    /// Newest published first, then drafts
    async fn list(&self, query: PostQuery) -> PostResult<Vec<Post>>;

    /// Replace the stored post with the same slug
    async fn update(&self, post: Post) -> PostResult<Post>;

    async fn delete(&self, slug: &str) -> PostResult<bool>;
}

/// In-memory implementation of PostRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<String, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> PostResult<Post> {
        let mut posts = self.posts.write().await;

        if posts.contains_key(&post.slug) {
            return Err(PostError::DuplicateSlug(post.slug));
        }

        posts.insert(post.slug.clone(), post.clone());
        Ok(post)
    }

    async fn get_by_slug(&self, slug: &str) -> PostResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.get(slug).cloned())
    }

    async fn list(&self, query: PostQuery) -> PostResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(select(posts.values().cloned(), &query))
    }

    async fn update(&self, post: Post) -> PostResult<Post> {
        let mut posts = self.posts.write().await;

        match posts.get_mut(&post.slug) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(PostError::NotFound(post.slug)),
        }
    }

    async fn delete(&self, slug: &str) -> PostResult<bool> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(slug).is_some())
    }
}

/// Filter, sort and page posts held in memory
pub(crate) fn select(posts: impl Iterator<Item = Post>, query: &PostQuery) -> Vec<Post> {
    let mut matching: Vec<Post> = posts.filter(|p| query.matches(p)).collect();
    matching.sort_by(Post::listing_order);
    matching
        .into_iter()
        .skip(query.offset as usize)
        .take(query.limit as usize)
        .collect()
}
