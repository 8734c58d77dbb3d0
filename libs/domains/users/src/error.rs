use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::{is_unavailable, is_unique_violation};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "User store unavailable");
            UserError::StoreUnavailable(err.to_string())
        } else {
            UserError::Internal(format!("Database error: {}", err))
        }
    }
}

impl UserError {
    pub(crate) fn from_insert(err: DbErr, email: &str) -> Self {
        if is_unique_violation(&err) {
            UserError::DuplicateEmail(email.to_string())
        } else {
            err.into()
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            e @ UserError::DuplicateEmail(_) => AppError::Conflict(e.to_string()),
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::Unauthorized => {
                AppError::Unauthorized("Authentication required".to_string())
            }
            UserError::InvalidInput(errors) => AppError::ValidationError(errors),
            UserError::Validation(msg) => AppError::coded(ErrorCode::ValidationError, msg),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            UserError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
