use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::error::{PostError, PostResult};
use crate::models::{Post, PostQuery, is_valid_slug};
use crate::repository::{PostRepository, select};

/// One `<slug>.json` file per post in a directory.
///
/// `update` overwrites the file and creates it when missing, so the store can
/// be used as a mirror of another repository.
#[derive(Debug, Clone)]
pub struct FilePostRepository {
    dir: PathBuf,
}

impl FilePostRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, slug: &str) -> Option<PathBuf> {
        is_valid_slug(slug).then(|| self.dir.join(format!("{}.json", slug)))
    }

    /// Write to a temp file first so readers never see half a post
    async fn write(&self, post: &Post) -> PostResult<()> {
        let path = self
            .path_for(&post.slug)
            .ok_or_else(|| PostError::Internal(format!("Invalid slug '{}'", post.slug)))?;

        fs::create_dir_all(&self.dir).await?;

        let tmp = self
            .dir
            .join(format!(".{}.{}.json.tmp", post.slug, Uuid::now_v7()));
        fs::write(&tmp, serde_json::to_vec_pretty(post)?).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn read(path: &Path) -> PostResult<Option<Post>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PostRepository for FilePostRepository {
    async fn create(&self, post: Post) -> PostResult<Post> {
        if self.get_by_slug(&post.slug).await?.is_some() {
            return Err(PostError::DuplicateSlug(post.slug));
        }
        self.write(&post).await?;
        Ok(post)
    }

    async fn get_by_slug(&self, slug: &str) -> PostResult<Option<Post>> {
        match self.path_for(slug) {
            Some(path) => Self::read(&path).await,
            None => Ok(None),
        }
    }

    /// Unreadable files are skipped with a warning
    async fn list(&self, query: PostQuery) -> PostResult<Vec<Post>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut posts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_post = path.extension().is_some_and(|ext| ext == "json")
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_post {
                continue;
            }

            match Self::read(&path).await {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping post file"),
            }
        }

        Ok(select(posts.into_iter(), &query))
    }

    async fn update(&self, post: Post) -> PostResult<Post> {
        self.write(&post).await?;
        Ok(post)
    }

    async fn delete(&self, slug: &str) -> PostResult<bool> {
        let Some(path) = self.path_for(slug) else {
            return Ok(false);
        };

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
