//! Person name value object and slug derivation.

use crate::error::{DomainError, DomainResult};

/// Validated first and last name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName {
    first_name: String,
    last_name: String,
}

impl UserName {
    pub fn create(first_name: &str, last_name: &str) -> DomainResult<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();

        if first_name.is_empty() {
            return Err(DomainError::validation("firstName", "El nombre es requerido"));
        }
        if last_name.is_empty() {
            return Err(DomainError::validation("lastName", "El apellido es requerido"));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// Rehydrate from storage without validation.
    pub fn from_trusted(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lowercased full name with every whitespace run collapsed to `-`.
    pub fn slug(&self) -> String {
        self.full_name()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}
