//! Guardian repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::guardian::{self, ActiveModel, Entity as GuardianEntity};
use crate::errors::AppResult;
use domain::Guardian;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GuardianRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guardian>>;

    /// Guardians of one user, oldest first
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Guardian>>;

    async fn insert(&self, guardian: &Guardian) -> AppResult<()>;

    async fn update(&self, guardian: &Guardian) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct GuardianStore {
    db: DatabaseConnection,
}

impl GuardianStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GuardianRepository for GuardianStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Guardian>> {
        let result = GuardianEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Guardian::from))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Guardian>> {
        let models = GuardianEntity::find()
            .filter(guardian::Column::UserId.eq(user_id))
            .order_by_asc(guardian::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Guardian::from).collect())
    }

    async fn insert(&self, guardian: &Guardian) -> AppResult<()> {
        GuardianEntity::insert(ActiveModel::from(guardian))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn update(&self, guardian: &Guardian) -> AppResult<()> {
        GuardianEntity::update(ActiveModel::from(guardian))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = GuardianEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
