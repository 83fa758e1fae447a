//! User profile repository (one profile per user).

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::user_profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::errors::AppResult;
use domain::UserProfile;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    async fn insert(&self, profile: &UserProfile) -> AppResult<()>;

    async fn update(&self, profile: &UserProfile) -> AppResult<()>;
}

pub struct UserProfileStore {
    db: DatabaseConnection,
}

impl UserProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserProfileRepository for UserProfileStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let result = ProfileEntity::find()
            .filter(user_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(UserProfile::from))
    }

    async fn insert(&self, profile: &UserProfile) -> AppResult<()> {
        ProfileEntity::insert(ActiveModel::from(profile))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> AppResult<()> {
        ProfileEntity::update(ActiveModel::from(profile))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
