use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AdminUser, AuditEvent, AuditOutcome, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, StoreUnavailableResponse,
        UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::ContactResult;
use crate::models::{ContactFilter, ContactMessage, SubmitContact};
use crate::repository::ContactRepository;
use crate::service::ContactService;

#[derive(OpenApi)]
#[openapi(
    paths(submit_message, list_messages, resolve_message, delete_message),
    components(
        schemas(ContactMessage, SubmitContact, ContactFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            StoreUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Contact form and admin inbox")
    )
)]
pub struct ApiDoc;

pub fn router<R: ContactRepository + 'static>(service: ContactService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_messages).post(submit_message))
        .route("/{id}", delete(delete_message))
        .route("/{id}/resolve", post(resolve_message))
        .with_state(shared_service)
}

fn audit(admin: String, action: &str, id: uuid::Uuid, headers: &HeaderMap) {
    AuditEvent::new(
        Some(admin),
        action,
        Some(format!("contact_message:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(headers))
    .with_user_agent(extract_user_agent(headers))
    .log();
}

/// Send a message to the board
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = SubmitContact,
    responses(
        (status = 201, description = "Message stored", body = ContactMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn submit_message<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    ValidatedJson(input): ValidatedJson<SubmitContact>,
) -> ContactResult<impl IntoResponse> {
    let message = service.submit(input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Admin inbox, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ContactFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Messages", body = Vec<ContactMessage>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_messages<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ContactFilter>,
) -> ContactResult<Json<Vec<ContactMessage>>> {
    let messages = service.list_messages(filter).await?;
    Ok(Json(messages))
}

/// Mark a message as answered (admin)
#[utoipa::path(
    post,
    path = "/{id}/resolve",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Message ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Message resolved", body = ContactMessage),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn resolve_message<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ContactResult<Json<ContactMessage>> {
    let message = service.resolve(id).await?;
    audit(admin.sub, "contact.resolve", id, &headers);
    Ok(Json(message))
}

/// Delete a message (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Message ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_message<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ContactResult<impl IntoResponse> {
    service.delete(id).await?;
    audit(admin.sub, "contact.delete", id, &headers);
    Ok(StatusCode::NO_CONTENT)
}
