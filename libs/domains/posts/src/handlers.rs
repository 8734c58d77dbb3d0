use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AdminUser, AuditEvent, AuditOutcome, CurrentUser, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, StoreUnavailableResponse,
        UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::PostResult;
use crate::models::{CreatePost, Post, PostFilter, UpdatePost};
use crate::repository::PostRepository;
use crate::service::PostService;

/// OpenAPI documentation for the Posts API
#[derive(OpenApi)]
#[openapi(
    paths(list_posts, get_post, create_post, update_post, delete_post),
    components(
        schemas(Post, CreatePost, UpdatePost, PostFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            StoreUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Blog articles")
    )
)]
pub struct ApiDoc;

/// Create the posts router
pub fn router<R: PostRepository + 'static>(service: PostService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{slug}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(shared_service)
}

fn audit(admin: String, action: &str, slug: &str, headers: &HeaderMap) {
    AuditEvent::new(
        Some(admin),
        action,
        Some(format!("post:{}", slug)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(headers))
    .with_user_agent(extract_user_agent(headers))
    .log();
}

/// List posts
///
/// Anonymous callers and members see published posts only.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PostFilter),
    responses(
        (status = 200, description = "Newest first", body = Vec<Post>),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn list_posts<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    user: CurrentUser,
    Query(filter): Query<PostFilter>,
) -> PostResult<Json<Vec<Post>>> {
    let posts = service.list_posts(filter, user.is_admin()).await?;
    Ok(Json(posts))
}

/// Get a post by slug
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = TAG,
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn get_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> PostResult<Json<Post>> {
    let post = service.get_post(&slug, user.is_admin()).await?;
    Ok(Json(post))
}

/// Create a post (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreatePost,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn create_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePost>,
) -> PostResult<impl IntoResponse> {
    let post = service.create_post(input).await?;
    audit(admin.sub, "post.create", &post.slug, &headers);
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update a post (admin)
#[utoipa::path(
    put,
    path = "/{slug}",
    tag = TAG,
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    request_body = UpdatePost,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn update_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    Path(slug): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdatePost>,
) -> PostResult<Json<Post>> {
    let post = service.update_post(&slug, input).await?;
    audit(admin.sub, "post.update", &slug, &headers);
    Ok(Json(post))
}

/// Delete a post (admin)
#[utoipa::path(
    delete,
    path = "/{slug}",
    tag = TAG,
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn delete_post<R: PostRepository>(
    State(service): State<Arc<PostService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> PostResult<impl IntoResponse> {
    service.delete_post(&slug).await?;
    audit(admin.sub, "post.delete", &slug, &headers);
    Ok(StatusCode::NO_CONTENT)
}
