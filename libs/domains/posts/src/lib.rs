//! Posts Domain
//!
//! Blog articles addressed by slug. In production the Postgres store is
//! wrapped in a [`FallbackPostRepository`] so that published posts stay
//! readable from a local JSON copy while the database is unreachable.
//!
//! ```rust,no_run
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! use domain_posts::{FallbackPostRepository, FilePostRepository, PgPostRepository, PostService};
//!
//! let repository = FallbackPostRepository::new(
//!     PgPostRepository::new(db),
//!     FilePostRepository::new("./data/posts"),
//! );
//! let router = domain_posts::handlers::router(PostService::new(repository));
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod store;

pub use error::{PostError, PostResult};
pub use models::{CreatePost, Post, PostFilter, PostQuery, UpdatePost};
pub use postgres::PgPostRepository;
pub use repository::{InMemoryPostRepository, PostRepository};
pub use service::PostService;
pub use store::{FallbackPostRepository, FilePostRepository};
