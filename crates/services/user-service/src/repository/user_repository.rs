//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{Page, PageRequest, User, UserDetails, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups report absence as `Ok(None)`. Writes fail with
/// [`AppError::NotFound`] for a missing id and [`AppError::Conflict`] when a
/// non-empty identity number is already held by another record. Every write
/// validates its [`UserDetails`] first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users in ascending id order
    async fn list(&self, request: PageRequest) -> AppResult<Page<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find user by identity number
    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<User>>;

    /// Create a new user with a freshly assigned id
    async fn create(&self, details: UserDetails) -> AppResult<User>;

    /// Replace every mutable field of an existing user
    async fn update(&self, id: UserId, details: UserDetails) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by a SQL table.
///
/// Uniqueness of the identity number is enforced by the table's unique
/// index, so concurrent writers are serialized by the database itself.
pub struct SqlUserStore {
    db: DatabaseConnection,
}

impl SqlUserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a failed write, turning unique index violations into conflicts.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Identity number"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for SqlUserStore {
    async fn list(&self, request: PageRequest) -> AppResult<Page<User>> {
        request.check()?;

        let paginator = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, request.size);
        let total = paginator.num_items().await?;

        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), request, total));
        }

        let models = paginator.fetch_page(request.page).await?;
        let users = models.into_iter().map(User::from).collect();
        Ok(Page::new(users, request, total))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<User>> {
        if identity_number.is_empty() {
            return Ok(None);
        }

        let result = UserEntity::find()
            .filter(user::Column::IdentityNumber.eq(identity_number))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, details: UserDetails) -> AppResult<User> {
        let details = details.validated()?;
        let active_model = ActiveModel {
            name: Set(details.name),
            phone_number: Set(details.phone_number),
            identity_number: Set(details.identity_number),
            region: Set(details.region.into_inner()),
            amount: Set(details.amount),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        tracing::debug!(user_id = model.id, "Inserted user row");
        Ok(User::from(model))
    }

    async fn update(&self, id: UserId, details: UserDetails) -> AppResult<User> {
        let details = details.validated()?;
        let txn = self.db.begin().await?;

        let user = UserEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.name = Set(details.name);
        active.phone_number = Set(details.phone_number);
        active.identity_number = Set(details.identity_number);
        active.region = Set(details.region.into_inner());
        active.amount = Set(details.amount);

        let model = active.update(&txn).await.map_err(write_error)?;
        txn.commit().await?;
        tracing::debug!(user_id = id, "Updated user row");
        Ok(User::from(model))
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::debug!(user_id = id, "Deleted user row");
        Ok(())
    }
}
