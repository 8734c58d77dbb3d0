pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1101,
///   "error": "CAPACITY_EXCEEDED",
///   "message": "Event 0192... is full (40/40)"
/// }
/// ```
///
/// `retriable` is only present (and `true`) when the client may resend the
/// same request unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details such as per-field validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retriable: bool,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
            retriable: code.is_retriable(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Shared HTTP error type. Domain crates convert their own error enums into
/// this, usually through [`AppError::Coded`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    /// Domain error with its own stable code
    #[error("{code}: {message}")]
    Coded { code: ErrorCode, message: String },
}

impl AppError {
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Coded {
            code,
            message: message.into(),
        }
    }

    fn into_parts(self) -> (ErrorCode, String, Option<serde_json::Value>) {
        match self {
            AppError::SerdeJson(e) => {
                tracing::error!(error = ?e, "JSON serialization error");
                (
                    ErrorCode::SerdeJsonError,
                    ErrorCode::SerdeJsonError.default_message().to_string(),
                    None,
                )
            }
            AppError::Database(e) => map_db_error(e),
            AppError::JsonExtractorRejection(e) => {
                (ErrorCode::JsonExtraction, e.body_text(), None)
            }
            AppError::ValidationError(e) => (
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                Some(validation_details(&e)),
            ),
            AppError::BadRequest(msg) => (ErrorCode::BadRequest, msg, None),
            AppError::Unauthorized(msg) => (ErrorCode::Unauthorized, msg, None),
            AppError::Forbidden(msg) => (ErrorCode::Forbidden, msg, None),
            AppError::NotFound(msg) => (ErrorCode::NotFound, msg, None),
            AppError::Conflict(msg) => (ErrorCode::Conflict, msg, None),
            AppError::InternalServerError(msg) => (ErrorCode::InternalError, msg, None),
            AppError::ServiceUnavailable(msg) => (ErrorCode::ServiceUnavailable, msg, None),
            AppError::Coded { code, message } => (code, message, None),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, details) = self.into_parts();
        let status = code.status();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %code, "{}", message);
        } else {
            tracing::info!(error_code = code.code(), error = %code, "{}", message);
        }

        let mut body = ErrorResponse::new(code, message);
        body.details = details;
        body.into_response_with(status)
    }
}

/// Unreachable store and pool exhaustion are reported as retriable; anything
/// else from the driver is an opaque internal error.
fn map_db_error(error: DbErr) -> (ErrorCode, String, Option<serde_json::Value>) {
    match error {
        DbErr::RecordNotFound(what) => (ErrorCode::NotFound, what, None),
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            tracing::warn!(error = ?error, "Database unavailable");
            (
                ErrorCode::StoreUnavailable,
                ErrorCode::StoreUnavailable.default_message().to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = ?other, "Database error");
            (
                ErrorCode::DatabaseError,
                ErrorCode::DatabaseError.default_message().to_string(),
                None,
            )
        }
    }
}

/// `{"field": [{"code": "...", "message": "...", "params": {...}}]}`
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let entries: Vec<serde_json::Value> = errs
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(fields)
}

/// Build an error response without going through [`AppError`]
pub fn error_response(message: impl Into<String>, error_code: ErrorCode) -> Response {
    ErrorResponse::new(error_code, message).into_response_with(error_code.status())
}
