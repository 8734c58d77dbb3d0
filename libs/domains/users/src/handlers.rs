use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, CurrentUser, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, RegisterUser, Role, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterUser, LoginRequest, AuthResponse, UserResponse, Role),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Accounts and bearer tokens")
    )
)]
pub struct ApiDoc;

/// Create the auth router
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(shared_service)
}

/// Create a member account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let auth = service.register_user(input).await?;

    AuditEvent::new(
        Some(auth.user.id.to_string()),
        "user.register",
        Some(format!("user:{}", auth.user.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(auth)))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let email = input.email.clone();

    match service.login(input).await {
        Ok(auth) => {
            AuditEvent::new(
                Some(auth.user.id.to_string()),
                "user.login",
                None,
                AuditOutcome::Success,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .log();
            Ok(Json(auth))
        }
        Err(e) => {
            if matches!(e, UserError::InvalidCredentials) {
                AuditEvent::new(None, "user.login", None, AuditOutcome::Failure)
                    .with_ip(extract_ip_from_headers(&headers))
                    .with_details(serde_json::json!({ "email": email }))
                    .log();
            }
            Err(e)
        }
    }
}

/// Current account
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed-in account", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    CurrentUser(claims): CurrentUser,
) -> UserResult<Json<UserResponse>> {
    let claims = claims.ok_or(UserError::Unauthorized)?;
    let user = service.me(&claims.sub).await?;
    Ok(Json(user))
}
