//! Role database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Role, RoleName, RoleRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Role names are an enumeration, so a corrupt row fails instead of rehydrating.
impl TryFrom<Model> for Role {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Role::reconstruct(RoleRecord {
            id: model.id,
            name: RoleName::parse(&model.name)?,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }))
    }
}

impl From<&Role> for ActiveModel {
    fn from(role: &Role) -> Self {
        let record = role.to_primitives();
        ActiveModel {
            id: Set(record.id),
            name: Set(record.name.as_str().to_string()),
            description: Set(record.description),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}
