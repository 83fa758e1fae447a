//! User-role join entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::UserRoleAssignment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserRoleAssignment {
    fn from(model: Model) -> Self {
        UserRoleAssignment {
            id: model.id,
            user_id: model.user_id,
            role_id: model.role_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&UserRoleAssignment> for ActiveModel {
    fn from(assignment: &UserRoleAssignment) -> Self {
        ActiveModel {
            id: Set(assignment.id),
            user_id: Set(assignment.user_id),
            role_id: Set(assignment.role_id),
            created_at: Set(assignment.created_at),
            updated_at: Set(assignment.updated_at),
        }
    }
}
