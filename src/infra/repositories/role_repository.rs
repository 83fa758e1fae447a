//! Role repository, including the user-role join table.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::{role, user_role};
use crate::errors::{AppError, AppResult};
use domain::{Role, RoleName, UserRoleAssignment};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>>;

    async fn list(&self) -> AppResult<Vec<Role>>;

    async fn insert(&self, role: &Role) -> AppResult<()>;

    /// Roles assigned to a user, through `user_roles`
    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>>;

    async fn has_assignment(&self, user_id: Uuid, role_id: Uuid) -> AppResult<bool>;

    async fn assign(&self, assignment: &UserRoleAssignment) -> AppResult<()>;
}

pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>> {
        let result = role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?;

        result
            .map(Role::try_from)
            .transpose()
            .map_err(AppError::from)
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|m| Role::try_from(m).map_err(AppError::from))
            .collect()
    }

    async fn insert(&self, role: &Role) -> AppResult<()> {
        role::Entity::insert(role::ActiveModel::from(role))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let rows = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .filter_map(|(_, role)| role)
            .map(|m| Role::try_from(m).map_err(AppError::from))
            .collect()
    }

    async fn has_assignment(&self, user_id: Uuid, role_id: Uuid) -> AppResult<bool> {
        let count = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn assign(&self, assignment: &UserRoleAssignment) -> AppResult<()> {
        user_role::Entity::insert(user_role::ActiveModel::from(assignment))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}
