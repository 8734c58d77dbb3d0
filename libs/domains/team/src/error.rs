use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::is_unavailable;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Team member not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Team store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TeamResult<T> = Result<T, TeamError>;

impl From<DbErr> for TeamError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "Team store unavailable");
            TeamError::StoreUnavailable(err.to_string())
        } else {
            TeamError::Internal(format!("Database error: {}", err))
        }
    }
}

impl From<TeamError> for AppError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::NotFound(id) => AppError::NotFound(format!("Team member {} not found", id)),
            TeamError::InvalidInput(errors) => AppError::ValidationError(errors),
            TeamError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            TeamError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TeamError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
