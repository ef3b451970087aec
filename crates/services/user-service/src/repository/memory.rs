//! In-process user repository.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::UserRepository;
use common::{AppError, AppResult};
use domain::{Page, PageRequest, User, UserDetails, UserId};

#[derive(Debug, Default)]
struct Records {
    last_id: UserId,
    /// Keyed by id; ids grow monotonically so this is insertion order
    users: BTreeMap<UserId, User>,
    identity_index: HashMap<String, UserId>,
}

impl Records {
    /// Id of another record already holding `identity_number`.
    fn holder_of(&self, identity_number: Option<&str>, except: Option<UserId>) -> Option<UserId> {
        let holder = *self.identity_index.get(identity_number?)?;
        (Some(holder) != except).then_some(holder)
    }
}

/// UserRepository kept entirely in memory.
///
/// All records sit behind one `RwLock`. Each write does its uniqueness
/// check and mutation under a single write guard, and no guard is held
/// across an await point.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<Records>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| AppError::internal("user store lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| AppError::internal("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn list(&self, request: PageRequest) -> AppResult<Page<User>> {
        request.check()?;
        let records = self.read()?;

        let total = records.users.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size).unwrap_or(usize::MAX);
        let users = records.users.values().skip(skip).take(take).cloned().collect();

        Ok(Page::new(users, request, total))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_identity_number(&self, identity_number: &str) -> AppResult<Option<User>> {
        let records = self.read()?;
        let user = records
            .identity_index
            .get(identity_number)
            .and_then(|id| records.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn create(&self, details: UserDetails) -> AppResult<User> {
        let details = details.validated()?;
        let mut records = self.write()?;

        if records
            .holder_of(details.identity_number.as_deref(), None)
            .is_some()
        {
            return Err(AppError::conflict("Identity number"));
        }

        records.last_id += 1;
        let user = User::from_details(records.last_id, details);
        if let Some(number) = &user.identity_number {
            records.identity_index.insert(number.clone(), user.id);
        }
        records.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Stored user in memory");
        Ok(user)
    }

    async fn update(&self, id: UserId, details: UserDetails) -> AppResult<User> {
        let details = details.validated()?;
        let mut records = self.write()?;

        let previous = records
            .users
            .get(&id)
            .ok_or(AppError::NotFound)?
            .identity_number
            .clone();

        if records
            .holder_of(details.identity_number.as_deref(), Some(id))
            .is_some()
        {
            return Err(AppError::conflict("Identity number"));
        }

        if let Some(number) = previous {
            records.identity_index.remove(&number);
        }
        if let Some(number) = &details.identity_number {
            records.identity_index.insert(number.clone(), id);
        }

        let user = records.users.get_mut(&id).ok_or(AppError::NotFound)?;
        user.apply(details);

        tracing::debug!(user_id = id, "Replaced user in memory");
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        let mut records = self.write()?;
        let user = records.users.remove(&id).ok_or(AppError::NotFound)?;

        if let Some(number) = user.identity_number {
            records.identity_index.remove(&number);
        }

        tracing::debug!(user_id = id, "Removed user from memory");
        Ok(())
    }
}
