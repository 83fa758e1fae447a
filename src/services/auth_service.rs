//! Authentication service - Registration, login and token verification.
//!
//! Password hashing and comparison live in the domain `Password` value
//! object; this service only runs them off the async executor.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user_service::{build_user, insert_with_default_role};
use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use domain::{CredentialField, RoleName, User, UserData};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Public view of the logged-in user
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(example = "0190b3c4-8d2e-7a51-9c3f-2b7e4d1a6f90")]
    pub uuid: Uuid,
    #[schema(example = "ana.quispe@gmail.com")]
    pub email: String,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Quispe")]
    pub last_name: String,
    #[schema(example = "ana-quispe")]
    pub slug: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.id(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            slug: user.slug().to_string(),
        }
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserSummary,
    pub roles: Vec<RoleName>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and give it the `user` role
    async fn register(
        &self,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<User>;

    /// Check credentials and issue a JWT
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id(),
        email: user.email().to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok((token, config.jwt_expiration_hours * SECONDS_PER_HOUR))
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    async fn check_password(&self, user: &User, password: String) -> AppResult<bool> {
        let user = user.clone();
        tokio::task::spawn_blocking(move || user.validate_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password check task failed: {}", e)))?
            .map_err(AppError::from)
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> AuthService for Authenticator<U> {
    async fn register(
        &self,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<User> {
        let normalized = email.trim().to_lowercase();
        if self.uow.users().find_by_email(&normalized).await?.is_some() {
            return Err(AppError::conflict("El correo ya está registrado"));
        }

        let user = build_user(UserData {
            first_name,
            last_name,
            email: normalized,
            password,
            ..Default::default()
        })
        .await?;

        insert_with_default_role(self.uow.as_ref(), &user).await?;
        tracing::info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let email = email.trim().to_lowercase();

        let user = self
            .uow
            .users()
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials(CredentialField::Email))?;

        if !self.check_password(&user, password).await? {
            tracing::debug!(user_id = %user.id(), "Rejected login with wrong password");
            return Err(AppError::InvalidCredentials(CredentialField::Password));
        }

        let roles = self
            .uow
            .roles()
            .find_for_user(user.id())
            .await?
            .iter()
            .map(|role| role.name())
            .collect();

        let (access_token, expires_in) = generate_token(&user, &self.config)?;

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            user: UserSummary::from(&user),
            roles,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{sample_user, user_role, TestUnitOfWork};
    use crate::infra::repositories::{MockRoleRepository, MockUserRepository};
    use domain::{Role, RoleName};

    const SECRET: &str = "test-secret-key-for-unit-tests-only-32";

    fn authenticator(uow: TestUnitOfWork) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(uow), Config::with_secret(SECRET).unwrap())
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_tagged_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = authenticator(TestUnitOfWork::new().with_users(users));
        let err = service
            .login("nadie@gmail.com".into(), "secreto".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials(CredentialField::Email)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_tagged_password() {
        let user = sample_user("ana@gmail.com", "12345678");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(TestUnitOfWork::new().with_users(users));
        let err = service
            .login("ana@gmail.com".into(), "otra-clave".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials(CredentialField::Password)));
    }

    #[tokio::test]
    async fn test_login_normalizes_email_and_issues_verifiable_token() {
        let user = sample_user("ana@gmail.com", "12345678");
        let user_id = user.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "ana@gmail.com")
            .returning(move |_| Ok(Some(user.clone())));
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_for_user()
            .returning(|_| Ok(vec![user_role()]));

        let service = authenticator(TestUnitOfWork::new().with_users(users).with_roles(roles));
        let response = service
            .login("  ANA@Gmail.com ".into(), "12345678".into())
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 86400);
        assert_eq!(response.user.uuid, user_id);
        assert_eq!(response.roles, vec![RoleName::User]);

        let claims = service.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ana@gmail.com");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[tokio::test]
    async fn test_verify_token_rejects_garbage() {
        let service = authenticator(TestUnitOfWork::new());
        assert!(matches!(
            service.verify_token("not-a-jwt"),
            Err(AppError::Jwt(_))
        ));
    }

    #[tokio::test]
    async fn test_register_conflict_when_email_taken() {
        let existing = sample_user("ana@gmail.com", "12345678");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = authenticator(TestUnitOfWork::new().with_users(users));
        let err = service
            .register("Ana@Gmail.com".into(), "secreto".into(), "Ana".into(), "Quispe".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m == "El correo ya está registrado"));
    }

    #[tokio::test]
    async fn test_register_persists_user_with_default_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let role = user_role();
        let role_id = role.id();
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .withf(|name| *name == RoleName::User)
            .returning(move |_| Ok(Some(role.clone())));

        let uow = TestUnitOfWork::new().with_users(users).with_roles(roles);
        let batches = uow.batches();
        let service = authenticator(uow);

        let user = service
            .register("ana@gmail.com".into(), "secreto".into(), "Ana".into(), "Quispe".into())
            .await
            .unwrap();

        assert!(user.validate_password("secreto").unwrap());
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].users.len(), 1);
        assert_eq!(recorded[0].assignments[0].role_id, role_id);
        assert_eq!(recorded[0].assignments[0].user_id, user.id());
    }

    #[tokio::test]
    async fn test_register_without_user_role_still_creates_account() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|_| Ok(None::<Role>));

        let uow = TestUnitOfWork::new().with_users(users).with_roles(roles);
        let batches = uow.batches();
        let service = authenticator(uow);

        service
            .register("ana@gmail.com".into(), "secreto".into(), "Ana".into(), "Quispe".into())
            .await
            .unwrap();

        let recorded = batches.lock().unwrap();
        assert!(recorded[0].assignments.is_empty());
    }
}
