//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-table inserts (import
//! batches, registrations) inside a single database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, EntityTrait, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::db;
use super::repositories::entities::{guardian, user, user_profile, user_role};
use super::repositories::{
    GuardianRepository, GuardianStore, RoleRepository, RoleStore, UserProfileRepository,
    UserProfileStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};
use domain::{Guardian, User, UserProfile, UserRoleAssignment};

/// Records inserted together, in foreign-key order, in one transaction.
#[derive(Debug, Clone, Default)]
pub struct InsertBatch {
    pub users: Vec<User>,
    pub profiles: Vec<UserProfile>,
    pub assignments: Vec<UserRoleAssignment>,
    pub guardians: Vec<Guardian>,
}

impl InsertBatch {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.profiles.is_empty()
            && self.assignments.is_empty()
            && self.guardians.is_empty()
    }

    pub fn clear(&mut self) {
        self.users.clear();
        self.profiles.clear();
        self.assignments.clear();
        self.guardians.clear();
    }
}

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn roles(&self) -> Arc<dyn RoleRepository>;

    fn profiles(&self) -> Arc<dyn UserProfileRepository>;

    fn guardians(&self) -> Arc<dyn GuardianRepository>;

    /// Insert users, then profiles, then role assignments, then guardians.
    /// Either everything is committed or nothing is.
    async fn insert_batch(&self, batch: &InsertBatch) -> AppResult<()>;

    /// Check storage connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    role_repo: Arc<RoleStore>,
    profile_repo: Arc<UserProfileStore>,
    guardian_repo: Arc<GuardianStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            role_repo: Arc::new(RoleStore::new(db.clone())),
            profile_repo: Arc::new(UserProfileStore::new(db.clone())),
            guardian_repo: Arc::new(GuardianStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn UserProfileRepository> {
        self.profile_repo.clone()
    }

    fn guardians(&self) -> Arc<dyn GuardianRepository> {
        self.guardian_repo.clone()
    }

    async fn insert_batch(&self, batch: &InsertBatch) -> AppResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        match write_batch(&txn, batch).await {
            Ok(()) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.db).await.map_err(AppError::from)
    }
}

async fn write_batch<C: ConnectionTrait>(conn: &C, batch: &InsertBatch) -> AppResult<()> {
    if !batch.users.is_empty() {
        user::Entity::insert_many(batch.users.iter().map(user::ActiveModel::from))
            .exec_without_returning(conn)
            .await
            .map_err(|e| match batch.users.as_slice() {
                [only] => super::repositories::email_conflict(e, only.email()),
                _ => batch_conflict(e),
            })?;
    }

    if !batch.profiles.is_empty() {
        user_profile::Entity::insert_many(
            batch.profiles.iter().map(user_profile::ActiveModel::from),
        )
        .exec_without_returning(conn)
        .await?;
    }

    if !batch.assignments.is_empty() {
        user_role::Entity::insert_many(batch.assignments.iter().map(user_role::ActiveModel::from))
            .exec_without_returning(conn)
            .await?;
    }

    if !batch.guardians.is_empty() {
        guardian::Entity::insert_many(batch.guardians.iter().map(guardian::ActiveModel::from))
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

/// With several users in the batch only the driver message names the offending email.
fn batch_conflict(err: sea_orm::DbErr) -> AppError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
            AppError::conflict(format!("Email ya registrado: {}", detail))
        }
        _ => err.into(),
    }
}
