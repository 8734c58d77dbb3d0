use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::common::{is_unavailable, is_unique_violation};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::EventStatus;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("Registration not found: {0}")]
    RegistrationNotFound(Uuid),

    #[error("Event {event_id} is full (capacity {capacity})")]
    CapacityExceeded { event_id: Uuid, capacity: i32 },

    #[error("Participant is already registered for event {event_id}")]
    AlreadyRegistered { event_id: Uuid },

    #[error("Event {event_id} is not open for registration (status: {status})")]
    RegistrationClosed { event_id: Uuid, status: EventStatus },

    #[error("Admin role required")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Event store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl From<DbErr> for EventError {
    fn from(err: DbErr) -> Self {
        if is_unavailable(&err) {
            tracing::warn!(error = %err, "Event store unavailable");
            EventError::StoreUnavailable(err.to_string())
        } else {
            EventError::Internal(format!("Database error: {}", err))
        }
    }
}

impl EventError {
    /// Lost insert race on the (participant, event) unique index
    pub(crate) fn from_registration_insert(err: DbErr, event_id: Uuid) -> Self {
        if is_unique_violation(&err) {
            EventError::AlreadyRegistered { event_id }
        } else {
            err.into()
        }
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::RegistrationNotFound(id) => AppError::coded(
                ErrorCode::RegistrationNotFound,
                format!("Registration {} not found", id),
            ),
            e @ EventError::CapacityExceeded { .. } => {
                AppError::coded(ErrorCode::CapacityExceeded, e.to_string())
            }
            e @ EventError::AlreadyRegistered { .. } => {
                AppError::coded(ErrorCode::AlreadyRegistered, e.to_string())
            }
            e @ EventError::RegistrationClosed { .. } => {
                AppError::coded(ErrorCode::RegistrationClosed, e.to_string())
            }
            EventError::Forbidden => AppError::Forbidden("Admin role required".to_string()),
            EventError::InvalidInput(errors) => AppError::ValidationError(errors),
            EventError::Validation(msg) => AppError::coded(ErrorCode::ValidationError, msg),
            EventError::StoreUnavailable(_) => AppError::coded(
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message(),
            ),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
