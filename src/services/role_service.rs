//! Role service - Role catalogue and user-role assignments.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN_DESCRIPTION, ROLE_SUPERADMIN_DESCRIPTION, ROLE_USER_DESCRIPTION};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use domain::{Role, RoleData, RoleName, UserRoleAssignment};

/// Description stored with each built-in role
pub fn default_description(name: RoleName) -> &'static str {
    match name {
        RoleName::Superadmin => ROLE_SUPERADMIN_DESCRIPTION,
        RoleName::Admin => ROLE_ADMIN_DESCRIPTION,
        RoleName::User => ROLE_USER_DESCRIPTION,
    }
}

#[async_trait]
pub trait RoleService: Send + Sync {
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>>;

    /// Names only, as carried by the authenticated request context
    async fn role_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<RoleName>>;

    /// Give the user a role unless they already hold it; returns their roles afterwards.
    async fn assign_role(&self, user_id: Uuid, name: RoleName) -> AppResult<Vec<Role>>;

    /// Create whichever built-in roles are missing; returns how many were created.
    async fn ensure_default_roles(&self) -> AppResult<usize>;
}

pub struct RoleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Look a role up by name, creating it with its default description when absent.
pub(crate) async fn find_or_create_role<U: UnitOfWork + ?Sized>(
    uow: &U,
    name: RoleName,
) -> AppResult<(Role, bool)> {
    let roles = uow.roles();
    if let Some(role) = roles.find_by_name(name).await? {
        return Ok((role, false));
    }

    let role = Role::make(RoleData {
        name: name.as_str().to_string(),
        description: Some(default_description(name).to_string()),
    })?;
    roles.insert(&role).await?;
    tracing::info!(role = %name, "Role created");
    Ok((role, true))
}

#[async_trait]
impl<U: UnitOfWork + 'static> RoleService for RoleManager<U> {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.uow.roles().list().await
    }

    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        self.uow.roles().find_for_user(user_id).await
    }

    async fn role_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<RoleName>> {
        let roles = self.roles_for_user(user_id).await?;
        Ok(roles.iter().map(Role::name).collect())
    }

    async fn assign_role(&self, user_id: Uuid, name: RoleName) -> AppResult<Vec<Role>> {
        if self.uow.users().find_by_id(user_id).await?.is_none() {
            return Err(AppError::user_not_found(user_id));
        }

        let roles = self.uow.roles();
        let role = roles
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rol \"{}\" no encontrado", name)))?;

        if roles.has_assignment(user_id, role.id()).await? {
            tracing::debug!(user_id = %user_id, role = %name, "Role already assigned");
        } else {
            roles
                .assign(&UserRoleAssignment::new(user_id, role.id()))
                .await?;
            tracing::info!(user_id = %user_id, role = %name, "Role assigned");
        }

        roles.find_for_user(user_id).await
    }

    async fn ensure_default_roles(&self) -> AppResult<usize> {
        let mut created = 0;
        for name in RoleName::ALL {
            let (_, is_new) = find_or_create_role(self.uow.as_ref(), name).await?;
            if is_new {
                created += 1;
            }
        }
        Ok(created)
    }
}
