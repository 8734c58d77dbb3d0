use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lower-case letters, digits and hyphens
static SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= 120 && SLUG.is_match(slug)
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if !is_valid_slug(slug) {
        return Err(validator::ValidationError::new("invalid_slug")
            .with_message("slug may only contain a-z, 0-9 and '-'".into()));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    if tags.len() > 10 || tags.iter().any(|t| t.trim().is_empty() || t.len() > 32) {
        return Err(validator::ValidationError::new("invalid_tags")
            .with_message("at most 10 non-empty tags of up to 32 characters".into()));
    }
    Ok(())
}

/// Blog article; the body is markdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    /// URL key, unique
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub author: String,
    pub tags: Vec<String>,
    pub published: bool,
    /// Set the first time the post is published
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(input: CreatePost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slug: input.slug,
            title: input.title,
            summary: input.summary,
            body: input.body,
            author: input.author,
            tags: input.tags,
            published: input.published,
            published_at: input.published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdatePost) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(summary) = update.summary {
            self.summary = summary;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(published) = update.published {
            self.published = published;
            if published && self.published_at.is_none() {
                self.published_at = Some(Utc::now());
            }
        }
        self.updated_at = Utc::now();
    }

    /// Newest published first; drafts after published posts, newest first
    pub fn listing_order(a: &Post, b: &Post) -> Ordering {
        match (a.published_at, b.published_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        }
    }
}

/// DTO for creating a post
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePost {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub summary: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// DTO for updating a post; the slug is fixed
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePost {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct PostFilter {
    /// Only posts carrying this tag
    pub tag: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            tag: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    20
}

/// What a store should return for a listing
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub published_only: bool,
    pub tag: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

impl PostQuery {
    pub fn new(filter: PostFilter, published_only: bool) -> Self {
        Self {
            published_only,
            tag: filter.tag,
            limit: filter.limit.min(100),
            offset: filter.offset,
        }
    }

    /// Published posts only, as anonymous callers see them
    pub fn public() -> Self {
        Self::new(PostFilter::default(), true)
    }

    pub fn matches(&self, post: &Post) -> bool {
        (!self.published_only || post.published)
            && self
                .tag
                .as_ref()
                .is_none_or(|tag| post.tags.iter().any(|t| t == tag))
    }
}
