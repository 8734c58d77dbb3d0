//! Gallery Domain
//!
//! Photo metadata, optionally tied to a club event. Images are referenced by
//! http(s) URL; uploads happen elsewhere.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{GalleryError, GalleryResult};
pub use models::{CreatePhoto, Photo, PhotoFilter};
pub use postgres::PgPhotoRepository;
pub use repository::{InMemoryPhotoRepository, PhotoRepository};
pub use service::GalleryService;
