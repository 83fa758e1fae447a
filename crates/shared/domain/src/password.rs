//! Password value object - Domain layer password handling.
//!
//! A password starts life as validated plain text and becomes an Argon2 hash
//! through [`Password::hash`]. Only hashed passwords can be compared or stored.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    value: String,
    hashed: bool,
}

// Don't expose plain text or hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .field("hashed", &self.hashed)
            .finish()
    }
}

impl Password {
    /// Validate a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is blank or shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn create(plain_text: &str) -> DomainResult<Self> {
        if plain_text.trim().is_empty() {
            return Err(DomainError::validation(
                "password",
                "La contraseña es requerida",
            ));
        }
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "password",
                format!(
                    "La contraseña debe tener al menos {} caracteres",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }

        Ok(Self {
            value: plain_text.to_string(),
            hashed: false,
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self {
            value: hash,
            hashed: true,
        }
    }

    /// Hash the plain text with a fresh salt. Already hashed passwords are returned as is.
    pub fn hash(self) -> DomainResult<Self> {
        if self.hashed {
            return Ok(self);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(self.value.as_bytes(), &salt)
            .map_err(|e| DomainError::Hashing(e.to_string()))?;

        Ok(Self::from_hash(hash.to_string()))
    }

    /// Compare a plain text candidate against this hash.
    ///
    /// # Errors
    /// Fails with [`DomainError::PasswordNotHashed`] when called on plain text.
    pub fn compare(&self, plain_text: &str) -> DomainResult<bool> {
        if !self.hashed {
            return Err(DomainError::PasswordNotHashed);
        }
        Ok(Self::verify_hash(plain_text, &self.value).unwrap_or(false))
    }

    pub fn is_hashed(&self) -> bool {
        self.hashed
    }

    /// Get the stored string (the hash once hashed).
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| DomainError::Hashing(e.to_string()))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}
