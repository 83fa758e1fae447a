//! Guardian service - A member's emergency contacts.
//!
//! Every operation is scoped to the owning user: a guardian that belongs to
//! someone else is reported as missing.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{Guardian, GuardianChanges, GuardianData};

const GUARDIAN_NOT_FOUND: &str = "Apoderado no encontrado";

#[async_trait]
pub trait GuardianService: Send + Sync {
    async fn list_guardians(&self, user_id: Uuid) -> AppResult<Vec<Guardian>>;

    async fn add_guardian(&self, data: GuardianData) -> AppResult<Guardian>;

    async fn update_guardian(
        &self,
        user_id: Uuid,
        guardian_id: Uuid,
        changes: GuardianChanges,
    ) -> AppResult<Guardian>;

    async fn delete_guardian(&self, user_id: Uuid, guardian_id: Uuid) -> AppResult<()>;
}

pub struct GuardianManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> GuardianManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_owned(&self, user_id: Uuid, guardian_id: Uuid) -> AppResult<Guardian> {
        self.uow
            .guardians()
            .find_by_id(guardian_id)
            .await?
            .filter(|g| g.user_id() == user_id)
            .ok_or_not_found(GUARDIAN_NOT_FOUND)
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> GuardianService for GuardianManager<U> {
    async fn list_guardians(&self, user_id: Uuid) -> AppResult<Vec<Guardian>> {
        self.uow.guardians().find_by_user_id(user_id).await
    }

    async fn add_guardian(&self, data: GuardianData) -> AppResult<Guardian> {
        let guardian = Guardian::make(data)?;
        self.uow.guardians().insert(&guardian).await?;
        Ok(guardian)
    }

    async fn update_guardian(
        &self,
        user_id: Uuid,
        guardian_id: Uuid,
        changes: GuardianChanges,
    ) -> AppResult<Guardian> {
        let mut guardian = self.find_owned(user_id, guardian_id).await?;
        guardian.update(changes)?;
        self.uow.guardians().update(&guardian).await?;
        Ok(guardian)
    }

    async fn delete_guardian(&self, user_id: Uuid, guardian_id: Uuid) -> AppResult<()> {
        let guardian = self.find_owned(user_id, guardian_id).await?;
        self.uow.guardians().delete(guardian.id()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockGuardianRepository;
    use crate::services::test_support::TestUnitOfWork;

    fn guardian_of(user_id: Uuid) -> Guardian {
        Guardian::make(GuardianData {
            user_id,
            full_name: "Rosa Huamán".into(),
            phone: Some("987654321".into()),
            email: None,
            contact_type: Some("primary".into()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_someone_elses_guardian_is_not_found() {
        let owner = Uuid::now_v7();
        let guardian = guardian_of(owner);
        let guardian_id = guardian.id();

        let mut repo = MockGuardianRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(guardian.clone())));
        repo.expect_update().never();

        let service = GuardianManager::new(Arc::new(TestUnitOfWork::new().with_guardians(repo)));
        let result = service
            .update_guardian(Uuid::now_v7(), guardian_id, GuardianChanges::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == GUARDIAN_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let owner = Uuid::now_v7();
        let guardian = guardian_of(owner);
        let guardian_id = guardian.id();
        let created_at = guardian.created_at();

        let mut repo = MockGuardianRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(guardian.clone())));
        repo.expect_update().times(1).returning(|_| Ok(()));

        let service = GuardianManager::new(Arc::new(TestUnitOfWork::new().with_guardians(repo)));
        let updated = service
            .update_guardian(
                owner,
                guardian_id,
                GuardianChanges {
                    email: Some("ROSA@Gmail.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), guardian_id);
        assert_eq!(updated.created_at(), created_at);
        assert_eq!(updated.email(), Some("rosa@gmail.com"));
        assert_eq!(updated.phone(), Some("987654321"));
    }

    #[tokio::test]
    async fn test_add_guardian_validates_before_insert() {
        let mut repo = MockGuardianRepository::new();
        repo.expect_insert().never();

        let service = GuardianManager::new(Arc::new(TestUnitOfWork::new().with_guardians(repo)));
        let result = service
            .add_guardian(GuardianData {
                user_id: Uuid::now_v7(),
                full_name: "Rosa".into(),
                email: Some("no-es-correo".into()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_own_guardian() {
        let owner = Uuid::now_v7();
        let guardian = guardian_of(owner);
        let guardian_id = guardian.id();

        let mut repo = MockGuardianRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(guardian.clone())));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = GuardianManager::new(Arc::new(TestUnitOfWork::new().with_guardians(repo)));
        service.delete_guardian(owner, guardian_id).await.unwrap();
    }
}
