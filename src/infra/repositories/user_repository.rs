//! User repository: lookups, paginated listing and single-row writes.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::entities::user_profile;
use crate::errors::{AppError, AppResult};
use crate::types::{SortOrder, UserListQuery, UserSortField};
use domain::{DomainError, User, UserWithProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Lookup by normalized (lowercase) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_with_profile(&self, id: Uuid) -> AppResult<Option<UserWithProfile>>;

    /// One page of users plus the total number of matches
    async fn list(&self, query: &UserListQuery) -> AppResult<(Vec<UserWithProfile>, u64)>;

    async fn insert(&self, user: &User) -> AppResult<()>;

    async fn update(&self, user: &User) -> AppResult<()>;

    /// Returns false when no row matched
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_with_profile(&self, id: Uuid) -> AppResult<Option<UserWithProfile>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(user_profile::Entity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(user, profile)| UserWithProfile {
            user: user.into(),
            profile: profile.map(Into::into),
        }))
    }

    async fn list(&self, query: &UserListQuery) -> AppResult<(Vec<UserWithProfile>, u64)> {
        let mut select = UserEntity::find().find_also_related(user_profile::Entity);

        match query.is_active {
            Some(active) => select = select.filter(user::Column::IsActive.eq(active)),
            // Active members first when not filtering on the flag
            None => select = select.order_by_desc(user::Column::IsActive),
        }

        if let Some(search) = query.search_term() {
            let pattern = like_pattern(&search.to_lowercase());
            let matches = |column: user::Column| {
                Expr::expr(Func::lower(Expr::col((UserEntity, column))))
                    .like(LikeExpr::new(pattern.clone()).escape('\\'))
            };
            select = select.filter(
                Condition::any()
                    .add(matches(user::Column::FirstName))
                    .add(matches(user::Column::LastName))
                    .add(matches(user::Column::Email)),
            );
        }

        let order = match query.sort_order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        };
        let select = select
            .order_by(sort_column(query.sort_by), order)
            .order_by_asc(user::Column::Id);

        let pagination = query.pagination();
        let paginator = select.paginate(&self.db, pagination.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(pagination.page_index()).await?;

        let users = rows
            .into_iter()
            .map(|(user, profile)| UserWithProfile {
                user: user.into(),
                profile: profile.map(Into::into),
            })
            .collect();

        Ok((users, total))
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        UserEntity::insert(ActiveModel::from(user))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| email_conflict(e, user.email()))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        UserEntity::update(ActiveModel::from(user))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::user_not_found(user.id()),
                other => email_conflict(other, user.email()),
            })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

fn sort_column(field: UserSortField) -> user::Column {
    match field {
        UserSortField::FirstName => user::Column::FirstName,
        UserSortField::LastName => user::Column::LastName,
        UserSortField::Email => user::Column::Email,
        UserSortField::CreatedAt => user::Column::CreatedAt,
        UserSortField::IsActive => user::Column::IsActive,
    }
}

/// Substring pattern where `%` and `_` in the term match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Unique-key violations on `users` can only come from the email column.
pub(crate) fn email_conflict(err: DbErr, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::UserAlreadyExists(email.to_string()).into()
        }
        _ => err.into(),
    }
}
