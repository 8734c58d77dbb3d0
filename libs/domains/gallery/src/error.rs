use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::is_unavailable;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Photo not found: {0}")]
    NotFound(Uuid),

    #[error("Event not found: {0}")]
    UnknownEvent(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Gallery store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type GalleryResult<T> = Result<T, GalleryError>;

impl From<DbErr> for GalleryError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "Gallery store unavailable");
            GalleryError::StoreUnavailable(err.to_string())
        } else {
            GalleryError::Internal(format!("Database error: {}", err))
        }
    }
}

impl GalleryError {
    /// The `event_id` foreign key rejects photos for unknown events
    pub(crate) fn from_insert(err: DbErr, event_id: Option<Uuid>) -> Self {
        match (err.sql_err(), event_id) {
            (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => {
                GalleryError::UnknownEvent(id)
            }
            _ => err.into(),
        }
    }
}

impl From<GalleryError> for AppError {
    fn from(err: GalleryError) -> Self {
        match err {
            GalleryError::NotFound(id) => AppError::NotFound(format!("Photo {} not found", id)),
            e @ GalleryError::UnknownEvent(_) => {
                AppError::coded(ErrorCode::ValidationError, e.to_string())
            }
            GalleryError::InvalidInput(errors) => AppError::ValidationError(errors),
            GalleryError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            GalleryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
