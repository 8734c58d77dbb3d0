use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::{is_unavailable, is_unique_violation};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Post with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Post store unavailable: {0}")]
    StoreUnavailable(String),

    /// Local file store failure
    #[error("Post file error: {0}")]
    File(#[from] std::io::Error),

    #[error("Post JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PostResult<T> = Result<T, PostError>;

impl From<DbErr> for PostError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "Post store unavailable");
            PostError::StoreUnavailable(err.to_string())
        } else {
            PostError::Internal(format!("Database error: {}", err))
        }
    }
}

impl PostError {
    pub(crate) fn from_insert(err: DbErr, slug: &str) -> Self {
        if is_unique_violation(&err) {
            PostError::DuplicateSlug(slug.to_string())
        } else {
            err.into()
        }
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(slug) => AppError::NotFound(format!("Post '{}' not found", slug)),
            e @ PostError::DuplicateSlug(_) => AppError::Conflict(e.to_string()),
            PostError::InvalidInput(errors) => AppError::ValidationError(errors),
            PostError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            e @ (PostError::File(_) | PostError::Json(_)) => {
                tracing::error!(error = %e, "Post file store failure");
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            PostError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
