//! User service - Member accounts and their extended profiles.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::infra::{InsertBatch, UnitOfWork};
use crate::types::{Paginated, UserListQuery};
use domain::{
    Email, RoleName, User, UserData, UserProfile, UserProfileData, UserRoleAssignment,
    UserWithProfile,
};

/// Admin-side account creation
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub national_id: Option<String>,
}

/// Partial account update; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn get_user_with_profile(&self, id: Uuid) -> AppResult<UserWithProfile>;

    /// Filtered, sorted page of users with their profiles
    async fn list_users(&self, query: UserListQuery) -> AppResult<Paginated<UserWithProfile>>;

    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Create the profile on first use, merge-update it afterwards
    async fn update_profile(&self, user_id: Uuid, data: UserProfileData)
        -> AppResult<UserProfile>;
}

/// Validate and hash on the blocking pool; argon2 is CPU bound.
pub(super) async fn build_user(data: UserData) -> AppResult<User> {
    tokio::task::spawn_blocking(move || User::create(data))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Insert a new user together with the `user` role, when that role exists.
pub(super) async fn insert_with_default_role<U: UnitOfWork + ?Sized>(
    uow: &U,
    user: &User,
) -> AppResult<()> {
    let mut batch = InsertBatch {
        users: vec![user.clone()],
        ..Default::default()
    };

    match uow.roles().find_by_name(RoleName::User).await? {
        Some(role) => batch
            .assignments
            .push(UserRoleAssignment::new(user.id(), role.id())),
        None => tracing::warn!(user_id = %user.id(), "Role \"user\" missing, account created without roles"),
    }

    uow.insert_batch(&batch).await
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.uow.users().find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("El correo ya está registrado"));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn get_user_with_profile(&self, id: Uuid) -> AppResult<UserWithProfile> {
        self.uow
            .users()
            .find_with_profile(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn list_users(&self, query: UserListQuery) -> AppResult<Paginated<UserWithProfile>> {
        let (users, total) = self.uow.users().list(&query).await?;
        Ok(Paginated::new(users, query.pagination(), total))
    }

    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let email = Email::create(&input.email)?;
        self.ensure_email_free(email.as_str()).await?;

        let user = build_user(UserData {
            first_name: input.first_name,
            last_name: input.last_name,
            email: email.into_string(),
            password: input.password,
            national_id: input.national_id,
            is_google_account: false,
        })
        .await?;

        insert_with_default_role(self.uow.as_ref(), &user).await?;
        tracing::info!(user_id = %user.id(), "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let mut user = self.get_user(id).await?;

        if changes.first_name.is_some() || changes.last_name.is_some() {
            let first = changes
                .first_name
                .unwrap_or_else(|| user.first_name().to_string());
            let last = changes
                .last_name
                .unwrap_or_else(|| user.last_name().to_string());
            user.update_name(&first, &last)?;
        }

        if let Some(raw) = changes.email {
            let email = Email::create(&raw)?;
            if email.as_str() != user.email() {
                self.ensure_email_free(email.as_str()).await?;
                user.update_email(email.as_str())?;
            }
        }

        if let Some(password) = changes.password {
            user = tokio::task::spawn_blocking(move || {
                let mut user = user;
                user.update_password(&password)?;
                Ok::<_, domain::DomainError>(user)
            })
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;
        }

        if let Some(active) = changes.is_active {
            user.set_active(active);
        }

        self.uow.users().update(&user).await?;
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.uow.users().delete(id).await? {
            return Err(AppError::user_not_found(id));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        data: UserProfileData,
    ) -> AppResult<UserProfile> {
        let profiles = self.uow.profiles();

        match profiles.find_by_user_id(user_id).await? {
            Some(mut profile) => {
                profile.update(data)?;
                profiles.update(&profile).await?;
                Ok(profile)
            }
            None => {
                self.uow
                    .users()
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| AppError::user_not_found(user_id))?;
                let profile = UserProfile::make(user_id, data)?;
                profiles.insert(&profile).await?;
                Ok(profile)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{
        MockRoleRepository, MockUserProfileRepository, MockUserRepository,
    };
    use crate::services::test_support::{sample_user, user_role, TestUnitOfWork};
    use mockall::predicate::eq;

    fn manager(uow: TestUnitOfWork) -> UserManager<TestUnitOfWork> {
        UserManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(TestUnitOfWork::new().with_users(users))
            .get_user(Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_builds_meta() {
        let mut users = MockUserRepository::new();
        users.expect_list().returning(|_| {
            let user = sample_user("ana@gmail.com", "12345678");
            Ok((vec![UserWithProfile { user, profile: None }], 21))
        });

        let query = UserListQuery {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let page = manager(TestUnitOfWork::new().with_users(users))
            .list_users(query)
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next_page);
        assert!(page.meta.has_previous_page);
    }

    #[tokio::test]
    async fn test_create_user_conflict() {
        let existing = sample_user("ana@gmail.com", "12345678");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("ana@gmail.com"))
            .returning(move |_| Ok(Some(existing.clone())));

        let err = manager(TestUnitOfWork::new().with_users(users))
            .create_user(NewUser {
                first_name: "Ana".into(),
                last_name: "Quispe".into(),
                email: " ANA@gmail.com".into(),
                password: "secreto".into(),
                national_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_user_assigns_default_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .returning(|_| Ok(Some(user_role())));

        let uow = TestUnitOfWork::new().with_users(users).with_roles(roles);
        let batches = uow.batches();

        let user = manager(uow)
            .create_user(NewUser {
                first_name: "Luis".into(),
                last_name: "Mamani Ccori".into(),
                email: "luis@gmail.com".into(),
                password: "70123456".into(),
                national_id: Some("70123456".into()),
            })
            .await
            .unwrap();

        assert_eq!(user.slug(), "luis-mamani-ccori");
        assert_eq!(user.national_id(), Some("70123456"));
        assert_eq!(batches.lock().unwrap()[0].assignments.len(), 1);
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let user = sample_user("ana@gmail.com", "12345678");
        let id = user.id();
        let other = sample_user("luis@gmail.com", "12345678");

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_find_by_email()
            .with(eq("luis@gmail.com"))
            .returning(move |_| Ok(Some(other.clone())));
        users.expect_update().never();

        let err = manager(TestUnitOfWork::new().with_users(users))
            .update_user(
                id,
                UserChanges {
                    email: Some("Luis@gmail.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_user_changes_name_password_and_flag() {
        let user = sample_user("ana@gmail.com", "12345678");
        let id = user.id();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_update().times(1).returning(|_| Ok(()));

        let updated = manager(TestUnitOfWork::new().with_users(users))
            .update_user(
                id,
                UserChanges {
                    last_name: Some("Quispe Huamán".into()),
                    password: Some("nueva-clave".into()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name(), "Ana");
        assert_eq!(updated.slug(), "ana-quispe-huamán");
        assert!(updated.validate_password("nueva-clave").unwrap());
        assert!(!updated.is_active());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(false));

        let result = manager(TestUnitOfWork::new().with_users(users))
            .delete_user(Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile_creates_then_merges() {
        let user = sample_user("ana@gmail.com", "12345678");
        let user_id = user.id();
        let existing = UserProfile::make(
            user_id,
            UserProfileData {
                alias: Some("Anita".into()),
                age: Some(15),
                ..Default::default()
            },
        )
        .unwrap();

        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(existing.clone())));
        profiles.expect_update().times(1).returning(|_| Ok(()));

        let merged = manager(TestUnitOfWork::new().with_profiles(profiles))
            .update_profile(
                user_id,
                UserProfileData {
                    age: Some(16),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(merged.data().alias.as_deref(), Some("Anita"));
        assert_eq!(merged.data().age, Some(16));
    }

    #[tokio::test]
    async fn test_update_profile_inserts_when_absent() {
        let user = sample_user("ana@gmail.com", "12345678");
        let user_id = user.id();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        let mut profiles = MockUserProfileRepository::new();
        profiles.expect_find_by_user_id().returning(|_| Ok(None));
        profiles.expect_insert().times(1).returning(|_| Ok(()));

        let profile = manager(TestUnitOfWork::new().with_users(users).with_profiles(profiles))
            .update_profile(
                user_id,
                UserProfileData {
                    gender: Some("f".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.user_id(), user_id);
        assert_eq!(profile.data().gender.as_deref(), Some("F"));
    }
}
