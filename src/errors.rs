//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, with automatic
//! HTTP response conversion into the `{ statusCode, path, message, errors? }`
//! envelope.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{CredentialField, DomainError};
use serde::Serialize;
use thiserror::Error;

/// Generic message for anything the client should not see the details of
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Extra error information attached to the envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// field -> reason
    Fields(BTreeMap<String, String>),
    /// `"field: reason"` lines from request validation
    Messages(Vec<String>),
}

impl ErrorDetails {
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ErrorDetails::Fields(BTreeMap::from([(field.into(), reason.into())]))
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("No autorizado")]
    Unauthorized,

    #[error("No tienes permisos para acceder a este recurso")]
    Forbidden,

    #[error("Credenciales inválidas")]
    InvalidCredentials(CredentialField),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<ErrorDetails>,
    },

    #[error("{0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Seeding
    #[error("{0}")]
    Import(String),

    // Internal
    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorDetails>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials(_) | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Import(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Token inválido o expirado".to_string()
            }
            AppError::Import(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Field-level details for the envelope's `errors` member
    pub fn details(&self) -> Option<ErrorDetails> {
        match self {
            AppError::InvalidCredentials(field) => {
                Some(ErrorDetails::field(field.key(), field.reason()))
            }
            AppError::Validation { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = ErrorEnvelope {
            status_code: status.as_u16(),
            path: String::new(),
            message: self.user_message(),
            errors: self.details(),
        };

        let mut response = (status, Json(envelope.clone())).into_response();
        // Picked up by the envelope middleware, which knows the request path
        response.extensions_mut().insert(envelope);
        response
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, ref reason }
            | DomainError::BadField {
                field, ref reason, ..
            } => AppError::Validation {
                details: Some(ErrorDetails::field(field, reason.clone())),
                message: err.to_string(),
            },
            DomainError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            DomainError::UserAlreadyExists(_) => AppError::Conflict(err.to_string()),
            DomainError::InvalidCredentials(field) => AppError::InvalidCredentials(field),
            DomainError::PasswordNotHashed | DomainError::Hashing(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            message: msg.into(),
            details: None,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn user_not_found(identifier: impl ToString) -> Self {
        DomainError::UserNotFound(identifier.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::EntityKind;

    #[test]
    fn test_domain_validation_maps_to_bad_request_with_field() {
        let err: AppError =
            DomainError::bad_field(EntityKind::Guardian, "phone", "Teléfono no puede exceder 50 caracteres")
                .into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.details(),
            Some(ErrorDetails::field(
                "phone",
                "Teléfono no puede exceder 50 caracteres"
            ))
        );
    }

    #[test]
    fn test_credentials_error_is_field_tagged() {
        let err: AppError = DomainError::InvalidCredentials(CredentialField::Password).into();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Credenciales inválidas");
        assert_eq!(
            err.details(),
            Some(ErrorDetails::field(
                "password",
                "La contraseña que ingresaste es incorrecta."
            ))
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.details().is_none());
    }

    #[test]
    fn test_conflict_and_not_found_statuses() {
        let conflict: AppError = DomainError::UserAlreadyExists("a@b.pe".into()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.user_message(), "Ya existe un usuario con el email \"a@b.pe\"");

        let missing = AppError::user_not_found("123");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_option_ext() {
        let found: Option<u8> = None;
        assert!(matches!(found.ok_or_not_found("nada"), Err(AppError::NotFound(m)) if m == "nada"));
    }
}
