//! Application state - Dependency injection container.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};
use crate::services::{
    AuthService, GuardianService, RoleService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub role_service: Arc<dyn RoleService>,
    pub guardian_service: Arc<dyn GuardianService>,
    /// Storage handle used by the health check
    pub storage: Arc<dyn UnitOfWork>,
}

impl AppState {
    /// Wire every service on top of a SeaORM connection.
    pub fn from_config(db: DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }

    /// Wire every service on top of any unit of work (tests use an in-memory one).
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        let services = Services::from_unit_of_work(uow.clone(), config);
        Self::new(&services, uow)
    }

    pub fn new(services: &impl ServiceContainer, storage: Arc<dyn UnitOfWork>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            role_service: services.roles(),
            guardian_service: services.guardians(),
            storage,
        }
    }
}
