//! Unit of Work double for service unit tests: mockall repositories plus a
//! recorder for `insert_batch` calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    GuardianRepository, MockGuardianRepository, MockRoleRepository, MockUserProfileRepository,
    MockUserRepository, RoleRepository, UserProfileRepository, UserRepository,
};
use crate::infra::{InsertBatch, UnitOfWork};
use domain::{Role, RoleData, User, UserData};

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    roles: Arc<MockRoleRepository>,
    profiles: Arc<MockUserProfileRepository>,
    guardians: Arc<MockGuardianRepository>,
    batches: Arc<Mutex<Vec<InsertBatch>>>,
    fail_batches: bool,
}

impl TestUnitOfWork {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            roles: Arc::new(MockRoleRepository::new()),
            profiles: Arc::new(MockUserProfileRepository::new()),
            guardians: Arc::new(MockGuardianRepository::new()),
            batches: Arc::new(Mutex::new(Vec::new())),
            fail_batches: false,
        }
    }

    pub(crate) fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub(crate) fn with_roles(mut self, repo: MockRoleRepository) -> Self {
        self.roles = Arc::new(repo);
        self
    }

    pub(crate) fn with_profiles(mut self, repo: MockUserProfileRepository) -> Self {
        self.profiles = Arc::new(repo);
        self
    }

    pub(crate) fn with_guardians(mut self, repo: MockGuardianRepository) -> Self {
        self.guardians = Arc::new(repo);
        self
    }

    pub(crate) fn failing_batches(mut self) -> Self {
        self.fail_batches = true;
        self
    }

    /// Batches passed to `insert_batch`, successful or not
    pub(crate) fn batches(&self) -> Arc<Mutex<Vec<InsertBatch>>> {
        self.batches.clone()
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    fn profiles(&self) -> Arc<dyn UserProfileRepository> {
        self.profiles.clone()
    }

    fn guardians(&self) -> Arc<dyn GuardianRepository> {
        self.guardians.clone()
    }

    async fn insert_batch(&self, batch: &InsertBatch) -> AppResult<()> {
        self.batches.lock().unwrap().push(batch.clone());
        if self.fail_batches {
            return Err(AppError::internal("simulated write failure"));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub(crate) fn sample_user(email: &str, password: &str) -> User {
    User::create(UserData {
        first_name: "Ana".into(),
        last_name: "Quispe".into(),
        email: email.into(),
        password: password.into(),
        ..Default::default()
    })
    .unwrap()
}

pub(crate) fn user_role() -> Role {
    Role::make(RoleData {
        name: "user".into(),
        description: Some("Regular user".into()),
    })
    .unwrap()
}
