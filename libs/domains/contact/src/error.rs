use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::is_unavailable;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact message not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Contact store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ContactResult<T> = Result<T, ContactError>;

impl From<DbErr> for ContactError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "Contact store unavailable");
            ContactError::StoreUnavailable(err.to_string())
        } else {
            ContactError::Internal(format!("Database error: {}", err))
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(id) => {
                AppError::NotFound(format!("Contact message {} not found", id))
            }
            ContactError::InvalidInput(errors) => AppError::ValidationError(errors),
            ContactError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            ContactError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
