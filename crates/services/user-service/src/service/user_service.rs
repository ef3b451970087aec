//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{Page, PageRequest, User, UserDetails, UserId};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List one page of users in insertion order
    async fn list_users(&self, request: PageRequest) -> AppResult<Page<User>>;

    /// Get user by ID; absence is not an error
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Get user by ID, failing with `NotFound` when absent
    async fn require_user(&self, id: UserId) -> AppResult<User>;

    /// Get user by identity number
    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create_user(&self, details: UserDetails) -> AppResult<User>;

    /// Replace all mutable fields of an existing user
    async fn update_user(&self, id: UserId, details: UserDetails) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

/// Log the caller-facing failures of a write before passing them on.
fn log_rejection(operation: &str, id: Option<UserId>, err: &AppError) {
    match err {
        AppError::NotFound => tracing::warn!(operation, ?id, "User not found"),
        AppError::Conflict(_) => tracing::warn!(operation, ?id, "Identity number already in use"),
        AppError::Validation(msg) => tracing::warn!(operation, ?id, %msg, "Rejected user details"),
        _ => tracing::error!(operation, ?id, error = %err, "User store failure"),
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, request: PageRequest) -> AppResult<Page<User>> {
        let page = self.repo.list(request).await?;
        tracing::debug!(
            page = page.page,
            size = page.size,
            total = page.total,
            has_next = page.has_next(),
            "Listed users"
        );
        Ok(page)
    }

    async fn get_user(&self, id: UserId) -> AppResult<Option<User>> {
        tracing::debug!(user_id = id, "Looking up user");
        self.repo.find_by_id(id).await
    }

    async fn require_user(&self, id: UserId) -> AppResult<User> {
        self.get_user(id).await?.ok_or_not_found()
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<User>> {
        self.repo.find_by_identity_number(identity_number).await
    }

    async fn create_user(&self, details: UserDetails) -> AppResult<User> {
        let user = self.repo.create(details).await.inspect_err(|err| {
            log_rejection("create", None, err);
        })?;

        tracing::info!(user_id = user.id, region = %user.region, "Created user");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, details: UserDetails) -> AppResult<User> {
        let user = self.repo.update(id, details).await.inspect_err(|err| {
            log_rejection("update", Some(id), err);
        })?;

        tracing::info!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        self.repo.delete(id).await.inspect_err(|err| {
            log_rejection("delete", Some(id), err);
        })?;

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn create_test_user(id: UserId) -> User {
        User::from_details(
            id,
            UserDetails::new("Test User", "central", 250).with_identity_number("ID-0001"),
        )
    }

    #[tokio::test]
    async fn test_get_user_absent_is_not_an_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(5_i64)).returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(5).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_require_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.require_user(5).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_require_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(9_i64))
            .returning(|id| Ok(Some(create_test_user(id))));

        let service = UserManager::new(Arc::new(repo));
        let user = service.require_user(9).await.unwrap();

        assert_eq!(user.id, 9);
    }

    #[tokio::test]
    async fn test_find_by_identity_number_forwards_key() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identity_number()
            .with(eq("ID-0001"))
            .times(1)
            .returning(|_| Ok(Some(create_test_user(3))));

        let service = UserManager::new(Arc::new(repo));
        let user = service.find_by_identity_number("ID-0001").await.unwrap();

        assert_eq!(user.map(|u| u.id), Some(3));
    }

    #[tokio::test]
    async fn test_create_user_conflict_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Identity number")));

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .create_user(UserDetails::new("Dup", "central", 1).with_identity_number("ID-0001"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_user_passes_full_details() {
        let details = UserDetails::new("Renamed", "east", 75).with_phone_number("555-0100");
        let expected = details.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(move |id, d| *id == 4 && *d == expected)
            .returning(|id, d| Ok(User::from_details(id, d)));

        let service = UserManager::new(Arc::new(repo));
        let user = service.update_user(4, details).await.unwrap();

        assert_eq!(user.id, 4);
        assert_eq!(user.name, "Renamed");
        assert_eq!(user.phone_number.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn test_delete_user_not_found_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let service = UserManager::new(Arc::new(repo));
        let result = service.delete_user(11).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_users_returns_repository_page() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|request| {
            Ok(Page::new(
                vec![create_test_user(1), create_test_user(2)],
                request,
                2,
            ))
        });

        let service = UserManager::new(Arc::new(repo));
        let page = service
            .list_users(PageRequest::new(0, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 1);
    }
}
