use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AdminUser, AuditEvent, AuditOutcome, CurrentUser, UuidPath, UuidPathPair, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, RegistrationRejectedResponse,
        StoreUnavailableResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::EventResult;
use crate::models::{
    CreateEvent, Event, EventFilter, EventStatus, Participant, RegisterParticipant,
    RegistrationEntry, UpdateEvent,
};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for the Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        update_event,
        delete_event,
        register,
        list_registrations,
        cancel_registration,
    ),
    components(
        schemas(
            Event,
            EventStatus,
            CreateEvent,
            UpdateEvent,
            EventFilter,
            RegisterParticipant,
            RegistrationEntry,
            Participant
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            RegistrationRejectedResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            StoreUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Events and event registration")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", get(get_event).put(update_event).delete(delete_event))
        .route("/{id}/register", post(register))
        .route("/{id}/registrations", get(list_registrations))
        .route(
            "/{id}/registrations/{registration_id}",
            delete(cancel_registration),
        )
        .with_state(shared_service)
}

/// List events
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(EventFilter),
    responses(
        (status = 200, description = "Events ordered by start time", body = Vec<Event>),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events(filter).await?;
    Ok(Json(events))
}

/// Create an event (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;

    AuditEvent::new(
        Some(admin.sub),
        "event.create",
        Some(format!("event:{}", event.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "title": event.title,
        "capacity": event.capacity,
        "status": event.status.to_string(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Update an event (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<Event>> {
    let event = service.update_event(id, input).await?;

    AuditEvent::new(
        Some(admin.sub),
        "event.update",
        Some(format!("event:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(event))
}

/// Delete an event and its registrations (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> EventResult<impl IntoResponse> {
    service.delete_event(id).await?;

    AuditEvent::new(
        Some(admin.sub),
        "event.delete",
        Some(format!("event:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Register for an event
///
/// Accepts `externalId` or `external_id` for the student number.
#[utoipa::path(
    post,
    path = "/{id}/register",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = RegisterParticipant,
    responses(
        (status = 201, description = "Registered", body = RegistrationEntry),
        (status = 400, response = RegistrationRejectedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn register<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<RegisterParticipant>,
) -> EventResult<impl IntoResponse> {
    let audit = |outcome: AuditOutcome, details: serde_json::Value| {
        AuditEvent::new(
            user.user_id(),
            "event.register",
            Some(format!("event:{}", id)),
            outcome,
        )
        .with_ip(extract_ip_from_headers(&headers))
        .with_user_agent(extract_user_agent(&headers))
        .with_details(details)
        .log();
    };

    match service.register(id, input).await {
        Ok(entry) => {
            audit(
                AuditOutcome::Success,
                json!({
                    "registration_id": entry.id,
                    "participant_id": entry.participant.id,
                }),
            );
            Ok((StatusCode::CREATED, Json(entry)))
        }
        Err(e) => {
            audit(AuditOutcome::Failure, json!({ "reason": e.to_string() }));
            Err(e)
        }
    }
}

/// List registrations for an event (admin)
#[utoipa::path(
    get,
    path = "/{id}/registrations",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registrations, oldest first", body = Vec<RegistrationEntry>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn list_registrations<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Vec<RegistrationEntry>>> {
    let entries = service.list_registrations(id, user.is_admin()).await?;
    Ok(Json(entries))
}

/// Cancel a registration (admin)
#[utoipa::path(
    delete,
    path = "/{id}/registrations/{registration_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("registration_id" = Uuid, Path, description = "Registration ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn cancel_registration<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: CurrentUser,
    headers: HeaderMap,
    UuidPathPair(id, registration_id): UuidPathPair,
) -> EventResult<impl IntoResponse> {
    service
        .cancel_registration(id, registration_id, user.is_admin())
        .await?;

    AuditEvent::new(
        user.user_id(),
        "registration.cancel",
        Some(format!("registration:{}", registration_id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "event_id": id }))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
