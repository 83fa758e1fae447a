//! In-memory storage shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use domain::{
    Guardian, Role, RoleData, RoleName, User, UserData, UserProfile, UserRoleAssignment,
    UserWithProfile,
};
use membership_registry::errors::{AppError, AppResult};
use membership_registry::infra::{
    GuardianRepository, InsertBatch, RoleRepository, UnitOfWork, UserProfileRepository,
    UserRepository,
};
use membership_registry::services::default_description;
use membership_registry::types::{SortOrder, UserListQuery, UserSortField};
use membership_registry::Config;

pub const TEST_SECRET: &str = "integration-test-secret-with-32-chars!!";

pub fn test_config() -> Config {
    Config::with_secret(TEST_SECRET).expect("valid test config")
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    roles: Vec<Role>,
    assignments: Vec<UserRoleAssignment>,
    profiles: Vec<UserProfile>,
    guardians: Vec<Guardian>,
    batch_calls: usize,
}

impl Tables {
    fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email() == email)
    }

    fn with_profile(&self, user: &User) -> UserWithProfile {
        UserWithProfile {
            user: user.clone(),
            profile: self
                .profiles
                .iter()
                .find(|p| p.user_id() == user.id())
                .cloned(),
        }
    }
}

/// Shared tables implementing every repository port, with a unique email index.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("tables lock")
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_with_profile(&self, id: Uuid) -> AppResult<Option<UserWithProfile>> {
        let tables = self.lock();
        Ok(tables
            .users
            .iter()
            .find(|u| u.id() == id)
            .map(|u| tables.with_profile(u)))
    }

    async fn list(&self, query: &UserListQuery) -> AppResult<(Vec<UserWithProfile>, u64)> {
        let tables = self.lock();
        let search = query.search_term().map(str::to_lowercase);

        let mut users: Vec<&User> = tables
            .users
            .iter()
            .filter(|u| query.is_active.map_or(true, |active| u.is_active() == active))
            .filter(|u| {
                search.as_deref().map_or(true, |s| {
                    u.first_name().to_lowercase().contains(s)
                        || u.last_name().to_lowercase().contains(s)
                        || u.email().contains(s)
                })
            })
            .collect();

        users.sort_by(|a, b| {
            let ordering = match query.sort_by {
                UserSortField::FirstName => a.first_name().cmp(b.first_name()),
                UserSortField::LastName => a.last_name().cmp(b.last_name()),
                UserSortField::Email => a.email().cmp(b.email()),
                UserSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
                UserSortField::IsActive => a.is_active().cmp(&b.is_active()),
            };
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = users.len() as u64;
        let pagination = query.pagination();
        let page = users
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|u| tables.with_profile(u))
            .collect();

        Ok((page, total))
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        let mut tables = self.lock();
        if tables.email_taken(user.email()) {
            return Err(AppError::conflict("El correo ya está registrado"));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut tables = self.lock();
        match tables.users.iter_mut().find(|u| u.id() == user.id()) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::user_not_found(user.id())),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock();
        let before = tables.users.len();
        tables.users.retain(|u| u.id() != id);
        let removed = tables.users.len() < before;
        if removed {
            tables.profiles.retain(|p| p.user_id() != id);
            tables.guardians.retain(|g| g.user_id() != id);
            tables.assignments.retain(|a| a.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>> {
        Ok(self.lock().roles.iter().find(|r| r.name() == name).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(self.lock().roles.clone())
    }

    async fn insert(&self, role: &Role) -> AppResult<()> {
        self.lock().roles.push(role.clone());
        Ok(())
    }

    async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let tables = self.lock();
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| tables.roles.iter().find(|r| r.id() == a.role_id).cloned())
            .collect())
    }

    async fn has_assignment(&self, user_id: Uuid, role_id: Uuid) -> AppResult<bool> {
        Ok(self
            .lock()
            .assignments
            .iter()
            .any(|a| a.user_id == user_id && a.role_id == role_id))
    }

    async fn assign(&self, assignment: &UserRoleAssignment) -> AppResult<()> {
        self.lock().assignments.push(assignment.clone());
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| p.user_id() == user_id)
            .cloned())
    }

    async fn insert(&self, profile: &UserProfile) -> AppResult<()> {
        self.lock().profiles.push(profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> AppResult<()> {
        let mut tables = self.lock();
        if let Some(existing) = tables.profiles.iter_mut().find(|p| p.id() == profile.id()) {
            *existing = profile.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl GuardianRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guardian>> {
        Ok(self.lock().guardians.iter().find(|g| g.id() == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Guardian>> {
        Ok(self
            .lock()
            .guardians
            .iter()
            .filter(|g| g.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, guardian: &Guardian) -> AppResult<()> {
        self.lock().guardians.push(guardian.clone());
        Ok(())
    }

    async fn update(&self, guardian: &Guardian) -> AppResult<()> {
        let mut tables = self.lock();
        if let Some(existing) = tables.guardians.iter_mut().find(|g| g.id() == guardian.id()) {
            *existing = guardian.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock();
        let before = tables.guardians.len();
        tables.guardians.retain(|g| g.id() != id);
        Ok(tables.guardians.len() < before)
    }
}

/// Unit of work over [`MemoryStore`]; batches are all-or-nothing.
#[derive(Default, Clone)]
pub struct MemoryUnitOfWork {
    store: Arc<MemoryStore>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with the three default roles already present
    pub fn with_default_roles() -> Self {
        let uow = Self::new();
        {
            let mut tables = uow.store.lock();
            for name in RoleName::ALL {
                tables.roles.push(
                    Role::make(RoleData {
                        name: name.as_str().to_string(),
                        description: Some(default_description(name).to_string()),
                    })
                    .expect("valid role"),
                );
            }
        }
        uow
    }

    pub fn stored_users(&self) -> Vec<User> {
        self.store.lock().users.clone()
    }

    pub fn stored_profiles(&self) -> Vec<UserProfile> {
        self.store.lock().profiles.clone()
    }

    pub fn stored_guardians(&self) -> Vec<Guardian> {
        self.store.lock().guardians.clone()
    }

    pub fn batch_calls(&self) -> usize {
        self.store.lock().batch_calls
    }

    pub fn role_names_of(&self, user_id: Uuid) -> Vec<RoleName> {
        let tables = self.store.lock();
        tables
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| tables.roles.iter().find(|r| r.id() == a.role_id))
            .map(|r| r.name())
            .collect()
    }

    /// Store a user directly, with the given roles
    pub fn seed_user(&self, email: &str, password: &str, roles: &[RoleName]) -> User {
        let user = User::create(UserData {
            first_name: "Ana".into(),
            last_name: "Quispe".into(),
            email: email.into(),
            password: password.into(),
            national_id: None,
            is_google_account: false,
        })
        .expect("valid user");

        let mut tables = self.store.lock();
        for name in roles {
            let role_id = tables
                .roles
                .iter()
                .find(|r| r.name() == *name)
                .map(|r| r.id())
                .expect("role seeded");
            tables
                .assignments
                .push(UserRoleAssignment::new(user.id(), role_id));
        }
        tables.users.push(user.clone());
        user
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.store.clone()
    }

    fn profiles(&self) -> Arc<dyn UserProfileRepository> {
        self.store.clone()
    }

    fn guardians(&self) -> Arc<dyn GuardianRepository> {
        self.store.clone()
    }

    async fn insert_batch(&self, batch: &InsertBatch) -> AppResult<()> {
        let mut tables = self.store.lock();
        tables.batch_calls += 1;

        let mut seen = HashSet::new();
        for user in &batch.users {
            if tables.email_taken(user.email()) || !seen.insert(user.email().to_string()) {
                return Err(AppError::conflict(format!(
                    "Email ya registrado: {}",
                    user.email()
                )));
            }
        }

        tables.users.extend(batch.users.iter().cloned());
        tables.profiles.extend(batch.profiles.iter().cloned());
        tables.assignments.extend(batch.assignments.iter().cloned());
        tables.guardians.extend(batch.guardians.iter().cloned());
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
