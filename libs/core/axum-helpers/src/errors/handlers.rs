use axum::response::Response;

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths
pub async fn not_found() -> Response {
    error_response("The requested resource was not found", ErrorCode::NotFound)
}
