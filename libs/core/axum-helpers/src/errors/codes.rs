//! Stable error codes returned in every error body.
//!
//! Each code carries:
//! - a SCREAMING_SNAKE_CASE identifier for clients (`"CAPACITY_EXCEEDED"`)
//! - an integer for logs and dashboards (`1101`)
//! - the HTTP status it maps to
//! - whether a client may retry the same request unchanged
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::CapacityExceeded;
//! assert_eq!(code.as_str(), "CAPACITY_EXCEEDED");
//! assert_eq!(code.code(), 1101);
//! assert!(!code.is_retriable());
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Generic client errors (1000-1099)
    /// Request validation failed
    ValidationError,
    /// Invalid UUID format in path
    InvalidUuid,
    /// Request body could not be parsed
    JsonExtraction,
    /// Requested resource was not found
    NotFound,
    /// Malformed request that is not a field validation failure
    BadRequest,
    /// Authentication credentials are missing or invalid
    Unauthorized,
    /// Authenticated caller lacks the required role
    Forbidden,
    /// Request conflicts with an existing resource
    Conflict,

    // Event registration (1100-1199)
    /// Event has reached its capacity ceiling
    CapacityExceeded,
    /// Participant already holds a registration for the event
    AlreadyRegistered,
    /// Event is not accepting registrations
    RegistrationClosed,
    /// Registration does not exist for the event
    RegistrationNotFound,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,
    /// A dependency of the service is down
    ServiceUnavailable,

    // Storage (2000-2999)
    /// Query failed for a reason other than availability
    DatabaseError,
    /// Persistent store could not be reached in time
    StoreUnavailable,

    // Serialization (5000s)
    /// JSON serialization error
    SerdeJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::RegistrationClosed => "REGISTRATION_CLOSED",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1099: generic client errors
    /// - 1100-1199: event registration
    /// - 2000-2999: storage
    /// - 5000-5999: serialization
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,
            Self::ServiceUnavailable => 1011,

            Self::CapacityExceeded => 1101,
            Self::AlreadyRegistered => 1102,
            Self::RegistrationClosed => 1103,
            Self::RegistrationNotFound => 1104,

            Self::DatabaseError => 2003,
            Self::StoreUnavailable => 2100,

            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::CapacityExceeded => "Event is full",
            Self::AlreadyRegistered => "Already registered for this event",
            Self::RegistrationClosed => "Event is not open for registration",
            Self::RegistrationNotFound => "Registration not found",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::StoreUnavailable => "Storage is temporarily unavailable",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidUuid
            | Self::JsonExtraction
            | Self::BadRequest
            | Self::CapacityExceeded
            | Self::AlreadyRegistered
            | Self::RegistrationClosed => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound | Self::RegistrationNotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError
            | Self::DatabaseError
            | Self::StoreUnavailable
            | Self::SerdeJsonError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the same request may succeed if simply sent again
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::StoreUnavailable | Self::ServiceUnavailable)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_codes_are_client_errors() {
        for code in [
            ErrorCode::CapacityExceeded,
            ErrorCode::AlreadyRegistered,
            ErrorCode::RegistrationClosed,
        ] {
            assert_eq!(code.status(), StatusCode::BAD_REQUEST);
            assert!(!code.is_retriable());
        }
        assert_eq!(
            ErrorCode::RegistrationNotFound.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_unavailable_is_retriable_server_error() {
        let code = ErrorCode::StoreUnavailable;
        assert_eq!(code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(code.is_retriable());
        assert!(!ErrorCode::DatabaseError.is_retriable());
    }

    #[test]
    fn test_string_and_integer_forms() {
        assert_eq!(ErrorCode::AlreadyRegistered.as_str(), "ALREADY_REGISTERED");
        assert_eq!(ErrorCode::AlreadyRegistered.code(), 1102);
        assert_eq!(ErrorCode::Forbidden.to_string(), "FORBIDDEN");
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::CapacityExceeded).unwrap();
        assert_eq!(json, "\"CAPACITY_EXCEEDED\"");
        let back: ErrorCode = serde_json::from_str("\"STORE_UNAVAILABLE\"").unwrap();
        assert_eq!(back, ErrorCode::StoreUnavailable);
    }
}
