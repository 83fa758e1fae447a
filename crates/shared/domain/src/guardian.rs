//! Guardian (emergency contact) entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::{
    GUARDIAN_CONTACT_TYPE_MAX_LENGTH, GUARDIAN_EMAIL_MAX_LENGTH, GUARDIAN_FULL_NAME_MAX_LENGTH,
    GUARDIAN_PHONE_MAX_LENGTH,
};
use crate::email::is_valid_email;
use crate::error::{DomainError, DomainResult, EntityKind};

/// Input for [`Guardian::make`].
#[derive(Debug, Clone, Default)]
pub struct GuardianData {
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_type: Option<String>,
}

/// Partial update for [`Guardian::update`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct GuardianChanges {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardianRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guardian {
    id: Uuid,
    user_id: Uuid,
    full_name: String,
    phone: Option<String>,
    email: Option<String>,
    contact_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Guardian {
    pub fn make(data: GuardianData) -> DomainResult<Self> {
        let fields = ValidFields::check(data)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::now_v7(),
            user_id: fields.user_id,
            full_name: fields.full_name,
            phone: fields.phone,
            email: fields.email,
            contact_type: fields.contact_type,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(record: GuardianRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            full_name: record.full_name,
            phone: record.phone,
            email: record.email,
            contact_type: record.contact_type,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Merge the changes over the current values and revalidate everything.
    pub fn update(&mut self, changes: GuardianChanges) -> DomainResult<()> {
        let merged = GuardianData {
            user_id: self.user_id,
            full_name: changes.full_name.unwrap_or_else(|| self.full_name.clone()),
            phone: changes.phone.or_else(|| self.phone.clone()),
            email: changes.email.or_else(|| self.email.clone()),
            contact_type: changes.contact_type.or_else(|| self.contact_type.clone()),
        };
        let fields = ValidFields::check(merged)?;

        *self = Self {
            id: self.id,
            user_id: fields.user_id,
            full_name: fields.full_name,
            phone: fields.phone,
            email: fields.email,
            contact_type: fields.contact_type,
            created_at: self.created_at,
            updated_at: Utc::now(),
        };
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn contact_type(&self) -> Option<&str> {
        self.contact_type.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_primitives(&self) -> GuardianRecord {
        GuardianRecord {
            id: self.id,
            user_id: self.user_id,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            contact_type: self.contact_type.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

struct ValidFields {
    user_id: Uuid,
    full_name: String,
    phone: Option<String>,
    email: Option<String>,
    contact_type: Option<String>,
}

impl ValidFields {
    fn check(data: GuardianData) -> DomainResult<Self> {
        if data.user_id.is_nil() {
            return Err(bad_field("userUuid", "UUID de usuario es requerido"));
        }

        let full_name = data.full_name.trim();
        if full_name.is_empty() {
            return Err(bad_field("fullName", "Nombre completo es requerido"));
        }
        max_length("fullName", "Nombre completo", full_name, GUARDIAN_FULL_NAME_MAX_LENGTH)?;

        let phone = non_blank(data.phone);
        if let Some(phone) = &phone {
            max_length("phone", "Teléfono", phone, GUARDIAN_PHONE_MAX_LENGTH)?;
        }

        let email = non_blank(data.email).map(|e| e.to_lowercase());
        if let Some(email) = &email {
            max_length("email", "Email", email, GUARDIAN_EMAIL_MAX_LENGTH)?;
            if !is_valid_email(email) {
                return Err(bad_field("email", "Formato de email inválido"));
            }
        }

        let contact_type = non_blank(data.contact_type);
        if let Some(contact_type) = &contact_type {
            max_length(
                "contactType",
                "Tipo de contacto",
                contact_type,
                GUARDIAN_CONTACT_TYPE_MAX_LENGTH,
            )?;
        }

        Ok(Self {
            user_id: data.user_id,
            full_name: full_name.to_string(),
            phone,
            email,
            contact_type,
        })
    }
}

fn bad_field(field: &'static str, reason: impl Into<String>) -> DomainError {
    DomainError::bad_field(EntityKind::Guardian, field, reason)
}

fn max_length(field: &'static str, label: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(bad_field(
            field,
            format!("{} no puede exceder {} caracteres", label, max),
        ));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
