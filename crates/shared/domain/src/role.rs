//! Role entity, role name enumeration and user-role assignments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_DESCRIPTION_MAX_LENGTH, ROLE_SUPERADMIN, ROLE_USER};
use crate::error::{DomainError, DomainResult, EntityKind};

/// Closed set of role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Superadmin,
    Admin,
    User,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::Superadmin, RoleName::Admin, RoleName::User];

    /// Normalize (trim + lowercase) and check membership in the enumeration.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err(DomainError::bad_field(
                EntityKind::Role,
                "name",
                "Nombre de rol es requerido",
            )),
            ROLE_SUPERADMIN => Ok(RoleName::Superadmin),
            ROLE_ADMIN => Ok(RoleName::Admin),
            ROLE_USER => Ok(RoleName::User),
            _ => Err(DomainError::bad_field(
                EntityKind::Role,
                "name",
                format!(
                    "Rol inválido. Valores permitidos: {}, {}, {}",
                    ROLE_SUPERADMIN, ROLE_ADMIN, ROLE_USER
                ),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Superadmin => ROLE_SUPERADMIN,
            RoleName::Admin => ROLE_ADMIN,
            RoleName::User => ROLE_USER,
        }
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, RoleName::Superadmin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, RoleName::Admin)
    }

    pub fn is_user(&self) -> bool {
        matches!(self, RoleName::User)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for [`Role::make`].
#[derive(Debug, Clone, Default)]
pub struct RoleData {
    pub name: String,
    pub description: Option<String>,
}

/// Persisted shape of a role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub id: Uuid,
    pub name: RoleName,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role entity. The name is fixed once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    id: Uuid,
    name: RoleName,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    pub fn make(data: RoleData) -> DomainResult<Self> {
        let name = RoleName::parse(&data.name)?;
        let description = validate_description(data.description.as_deref())?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::now_v7(),
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(record: RoleRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn update_description(&mut self, description: Option<&str>) -> DomainResult<()> {
        self.description = validate_description(description)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> RoleName {
        self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_primitives(&self) -> RoleRecord {
        RoleRecord {
            id: self.id,
            name: self.name,
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn validate_description(description: Option<&str>) -> DomainResult<Option<String>> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > ROLE_DESCRIPTION_MAX_LENGTH {
        return Err(DomainError::bad_field(
            EntityKind::Role,
            "description",
            format!(
                "Descripción no puede exceder {} caracteres",
                ROLE_DESCRIPTION_MAX_LENGTH
            ),
        ));
    }
    Ok(Some(description.to_string()))
}

/// Link between one user and one role.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRoleAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRoleAssignment {
    pub fn new(user_id: Uuid, role_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            role_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> RoleData {
        RoleData {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_role_name_outside_enumeration_is_rejected() {
        let err = Role::make(data("owner")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Campo de rol inválido: name. Rol inválido. Valores permitidos: superadmin, admin, user"
        );
    }

    #[test]
    fn test_role_name_is_lowercased() {
        let role = Role::make(data("ADMIN")).unwrap();
        assert_eq!(role.name(), RoleName::Admin);
        assert_eq!(role.name().as_str(), "admin");
        assert!(role.name().is_admin());
    }

    #[test]
    fn test_role_name_required() {
        let err = Role::make(data("  ")).unwrap_err();
        assert_eq!(err.field_reason(), Some(("name", "Nombre de rol es requerido")));
    }

    #[test]
    fn test_description_limit() {
        let mut role = Role::make(RoleData {
            name: "user".into(),
            description: Some(" Regular user ".into()),
        })
        .unwrap();
        assert_eq!(role.description(), Some("Regular user"));

        let too_long = "x".repeat(256);
        let err = role.update_description(Some(&too_long)).unwrap_err();
        assert_eq!(
            err.field_reason(),
            Some(("description", "Descripción no puede exceder 255 caracteres"))
        );
        assert_eq!(role.description(), Some("Regular user"));

        role.update_description(Some(&"y".repeat(255))).unwrap();
        assert_eq!(role.description().map(str::len), Some(255));
    }

    #[test]
    fn test_reconstruct_round_trips_record() {
        let role = Role::make(data("superadmin")).unwrap();
        let restored = Role::reconstruct(role.to_primitives());
        assert_eq!(restored, role);
        assert!(restored.name().is_superadmin());
    }
}
