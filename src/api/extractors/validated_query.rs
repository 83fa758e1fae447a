//! Validated query-string extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validated_json::{validation_messages, INVALID_BODY_MESSAGE};
use crate::errors::{AppError, ErrorDetails};

/// Query parameters that passed their `validator` rules.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation {
                message: INVALID_BODY_MESSAGE.to_string(),
                details: Some(ErrorDetails::Messages(vec![e.body_text()])),
            })?;

        value.validate().map_err(|e| AppError::Validation {
            message: INVALID_BODY_MESSAGE.to_string(),
            details: Some(ErrorDetails::Messages(validation_messages(&e))),
        })?;

        Ok(ValidatedQuery(value))
    }
}
