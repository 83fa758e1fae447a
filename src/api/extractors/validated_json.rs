//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, ErrorDetails};

pub const INVALID_BODY_MESSAGE: &str = "Los datos ingresados no son válidos";

/// JSON body that has already passed its `validator` rules.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct LoginRequest {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn login(ValidatedJson(payload): ValidatedJson<LoginRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation {
                message: INVALID_BODY_MESSAGE.to_string(),
                details: Some(ErrorDetails::Messages(vec![e.body_text()])),
            })?;

        value.validate().map_err(|e| AppError::Validation {
            message: INVALID_BODY_MESSAGE.to_string(),
            details: Some(ErrorDetails::Messages(validation_messages(&e))),
        })?;

        Ok(ValidatedJson(value))
    }
}

/// `"field: message"` lines, sorted by field
pub(super) fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "valor inválido".to_string());
                format!("{}: {}", field, reason)
            })
        })
        .collect();
    messages.sort();
    messages
}
