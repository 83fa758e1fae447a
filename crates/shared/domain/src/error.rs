//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::fmt;

use thiserror::Error;

/// Entity that owns a rejected field, used to label [`DomainError::BadField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Role,
    Guardian,
    UserProfile,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::User => "usuario",
            EntityKind::Role => "rol",
            EntityKind::Guardian => "apoderado",
            EntityKind::UserProfile => "perfil",
        };
        f.write_str(label)
    }
}

/// Which half of a login attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Email,
    Password,
}

impl CredentialField {
    /// Field key used in error payloads
    pub fn key(&self) -> &'static str {
        match self {
            CredentialField::Email => "email",
            CredentialField::Password => "password",
        }
    }

    /// Human-readable reason shown to the client
    pub fn reason(&self) -> &'static str {
        match self {
            CredentialField::Email => "No existe un usuario con ese correo electrónico.",
            CredentialField::Password => "La contraseña que ingresaste es incorrecta.",
        }
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A value object rejected its input
    #[error("{reason}")]
    Validation { field: &'static str, reason: String },

    /// An entity factory or update rejected one of its fields
    #[error("Campo de {entity} inválido: {field}. {reason}")]
    BadField {
        entity: EntityKind,
        field: &'static str,
        reason: String,
    },

    #[error("No se puede comparar una contraseña que no está hasheada")]
    PasswordNotHashed,

    #[error("Password hash failed: {0}")]
    Hashing(String),

    #[error("Usuario con identificador \"{0}\" no fue encontrado")]
    UserNotFound(String),

    #[error("Ya existe un usuario con el email \"{0}\"")]
    UserAlreadyExists(String),

    #[error("Credenciales inválidas")]
    InvalidCredentials(CredentialField),
}

impl DomainError {
    /// Create a value-object validation error
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create an entity field error
    pub fn bad_field(entity: EntityKind, field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::BadField {
            entity,
            field,
            reason: reason.into(),
        }
    }

    /// Field name and reason for validation failures, if this is one
    pub fn field_reason(&self) -> Option<(&'static str, &str)> {
        match self {
            DomainError::Validation { field, reason } | DomainError::BadField { field, reason, .. } => {
                Some((field, reason.as_str()))
            }
            _ => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
