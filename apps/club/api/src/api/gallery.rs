use axum::Router;
use domain_gallery::{GalleryService, PgPhotoRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgPhotoRepository::new(state.db.clone());
    handlers::router(GalleryService::new(repository))
}
