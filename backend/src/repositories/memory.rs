//! In-memory user store for tests and local runs without PostgreSQL

use super::user::{NewUser, StoreError, UserRecord, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

/// Mirrors the uniqueness rules of the `users` table: each identifier
/// column is unique among records that populate it.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing record
    pub fn insert(&self, record: UserRecord) {
        self.users
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn same(a: &Option<String>, b: Option<&str>) -> bool {
    matches!((a.as_deref(), b), (Some(x), Some(y)) if x == y)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_any_identifier(&self, value: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self
            .users
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(users.iter().find(|u| u.matches_identifier(value)).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self
            .users
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let credential = &user.credential;
        let conflict = users.iter().any(|u| {
            same(&u.email, credential.email())
                || same(&u.username, credential.username())
                || same(&u.mobile, credential.mobile())
        });
        if conflict {
            return Err(StoreError::Conflict);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: credential.email().map(String::from),
            username: credential.username().map(String::from),
            mobile: credential.mobile().map(String::from),
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }
}
