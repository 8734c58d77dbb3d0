//! JSON body extractor that runs `validator` rules before the handler.

use crate::errors::{ErrorCode, ErrorResponse, validation_details};
use axum::{
    extract::{FromRequest, Json, Request},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body and calls [`Validate::validate`], rejecting with
/// `VALIDATION_ERROR` (400) and per-field details on failure.
///
/// ```ignore
/// async fn register(ValidatedJson(input): ValidatedJson<RegisterParticipant>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ErrorResponse::new(ErrorCode::JsonExtraction, e.body_text())
                .into_response_with(ErrorCode::JsonExtraction.status())
        })?;

        data.validate().map_err(|e| {
            ErrorResponse::new(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            )
            .with_details(validation_details(&e))
            .into_response_with(ErrorCode::ValidationError.status())
        })?;

        Ok(ValidatedJson(data))
    }
}
