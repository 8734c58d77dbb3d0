use axum::Router;
use domain_posts::{
    FallbackPostRepository, FilePostRepository, PgPostRepository, PostService, handlers,
};

/// Posts read from Postgres and fall back to the JSON copies on disk
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = FallbackPostRepository::new(
        PgPostRepository::new(state.db.clone()),
        FilePostRepository::new(&state.config.posts_fallback_dir),
    );
    handlers::router(PostService::new(repository))
}
