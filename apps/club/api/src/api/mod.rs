use axum::{Router, middleware, routing::get};
use axum_helpers::optional_jwt_auth_middleware;

use crate::state::AppState;

pub mod auth;
pub mod contact;
pub mod events;
pub mod gallery;
pub mod health;
pub mod posts;
pub mod team;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every route sees the bearer token, if any: valid tokens become a
/// `CurrentUser`, anything else is treated as anonymous and left to the
/// handlers to reject.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/events", events::router(state))
        .nest("/posts", posts::router(state))
        .nest("/team", team::router(state))
        .nest("/gallery", gallery::router(state))
        .nest("/contact", contact::router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            optional_jwt_auth_middleware,
        ))
}

/// `GET /ready`, merged next to `/health` outside `/api`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
