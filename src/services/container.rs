//! Service Container - Centralized service access.
//!
//! All services share one Unit of Work, so they see the same repositories
//! and connection pool.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, GuardianManager, GuardianService, RoleManager, RoleService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::UnitOfWork;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn roles(&self) -> Arc<dyn RoleService>;

    fn guardians(&self) -> Arc<dyn GuardianService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    role_service: Arc<dyn RoleService>,
    guardian_service: Arc<dyn GuardianService>,
}

impl Services {
    /// Wire every service on top of the given Unit of Work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            role_service: Arc::new(RoleManager::new(uow.clone())),
            guardian_service: Arc::new(GuardianManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }

    fn guardians(&self) -> Arc<dyn GuardianService> {
        self.guardian_service.clone()
    }
}
