use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    AdminUser, AuditEvent, AuditOutcome, CurrentUser, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::TeamResult;
use crate::models::{CreateTeamMember, TeamMember, UpdateTeamMember};
use crate::repository::TeamRepository;
use crate::service::TeamService;

#[derive(OpenApi)]
#[openapi(
    paths(list_members, create_member, update_member, delete_member),
    components(
        schemas(TeamMember, CreateTeamMember, UpdateTeamMember),
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
        (name = TAG, description = "Club team roster")
    )
)]
pub struct ApiDoc;

pub fn router<R: TeamRepository + 'static>(service: TeamService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/{id}", put(update_member).delete(delete_member))
        .with_state(shared_service)
}

fn audit(admin: String, action: &str, id: uuid::Uuid, headers: &HeaderMap) {
    AuditEvent::new(
        Some(admin),
        action,
        Some(format!("team_member:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(headers))
    .with_user_agent(extract_user_agent(headers))
    .log();
}

/// List team members
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Members by display order", body = Vec<TeamMember>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_members<R: TeamRepository>(
    State(service): State<Arc<TeamService<R>>>,
    user: CurrentUser,
) -> TeamResult<Json<Vec<TeamMember>>> {
    let members = service.list_members(user.is_admin()).await?;
    Ok(Json(members))
}

/// Add a team member (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTeamMember,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Member added", body = TeamMember),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_member<R: TeamRepository>(
    State(service): State<Arc<TeamService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateTeamMember>,
) -> TeamResult<impl IntoResponse> {
    let member = service.create_member(input).await?;
    audit(admin.sub, "team.create", member.id, &headers);
    Ok((StatusCode::CREATED, Json(member)))
}

/// Update a team member (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Team member ID")
    ),
    request_body = UpdateTeamMember,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member updated", body = TeamMember),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_member<R: TeamRepository>(
    State(service): State<Arc<TeamService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTeamMember>,
) -> TeamResult<Json<TeamMember>> {
    let member = service.update_member(id, input).await?;
    audit(admin.sub, "team.update", id, &headers);
    Ok(Json(member))
}

/// Remove a team member (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Team member ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_member<R: TeamRepository>(
    State(service): State<Arc<TeamService<R>>>,
    AdminUser(admin): AdminUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> TeamResult<impl IntoResponse> {
    service.delete_member(id).await?;
    audit(admin.sub, "team.delete", id, &headers);
    Ok(StatusCode::NO_CONTENT)
}
