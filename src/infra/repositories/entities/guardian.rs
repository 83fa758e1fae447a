//! Guardian database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Guardian, GuardianRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guardians")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_type: Option<String>,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Guardian {
    fn from(model: Model) -> Self {
        Guardian::reconstruct(GuardianRecord {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            phone: model.phone,
            email: model.email,
            contact_type: model.contact_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Guardian> for ActiveModel {
    fn from(guardian: &Guardian) -> Self {
        let record = guardian.to_primitives();
        ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            full_name: Set(record.full_name),
            phone: Set(record.phone),
            email: Set(record.email),
            contact_type: Set(record.contact_type),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}
