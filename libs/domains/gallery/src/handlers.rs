use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AdminUser, AuditEvent, AuditOutcome, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::GalleryResult;
use crate::models::{CreatePhoto, Photo, PhotoFilter};
use crate::repository::PhotoRepository;
use crate::service::GalleryService;

#[derive(OpenApi)]
#[openapi(
    paths(list_photos, get_photo, add_photo, delete_photo),
    components(
        schemas(Photo, CreatePhoto, PhotoFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Photo gallery")
    )
)]
pub struct ApiDoc;

pub fn router<R: PhotoRepository + 'static>(service: GalleryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_photos).post(add_photo))
        .route("/{id}", get(get_photo).delete(delete_photo))
        .with_state(shared_service)
}

/// List photos, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PhotoFilter),
    responses(
        (status = 200, description = "Photos", body = Vec<Photo>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_photos<R: PhotoRepository>(
    State(service): State<Arc<GalleryService<R>>>,
    Query(filter): Query<PhotoFilter>,
) -> GalleryResult<Json<Vec<Photo>>> {
    let photos = service.list_photos(filter).await?;
    Ok(Json(photos))
}

/// Get a photo by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo found", body = Photo),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_photo<R: PhotoRepository>(
    State(service): State<Arc<GalleryService<R>>>,
    UuidPath(id): UuidPath,
) -> GalleryResult<Json<Photo>> {
    let photo = service.get_photo(id).await?;
    Ok(Json(photo))
}

/// Add a photo (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreatePhoto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Photo added", body = Photo),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_photo<R: PhotoRepository>(
    State(service): State<Arc<GalleryService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePhoto>,
) -> GalleryResult<impl IntoResponse> {
    let photo = service.add_photo(input).await?;

    AuditEvent::new(
        Some(admin.sub),
        "gallery.add",
        Some(format!("photo:{}", photo.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "event_id": photo.event_id }))
    .log();

    Ok((StatusCode::CREATED, Json(photo)))
}

/// Delete a photo (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Photo ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_photo<R: PhotoRepository>(
    State(service): State<Arc<GalleryService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> GalleryResult<impl IntoResponse> {
    service.delete_photo(id).await?;

    AuditEvent::new(
        Some(admin.sub),
        "gallery.delete",
        Some(format!("photo:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
