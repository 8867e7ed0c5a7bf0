/// In-memory user store
///
/// A `tokio::sync::RwLock` around a `HashMap` keyed by identifier. Reads
/// dominate (every sign-in is a lookup); writes happen on sign-up and
/// delete. Suitable for the demo binary and tests; nothing survives a
/// restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NewUser, StoreError, UserRecord, UserStore};

/// [`UserStore`] implementation holding records in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(identifier).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate);
        }

        let record = UserRecord {
            email: user.email.clone(),
            password_hash: user.password_hash,
            roles: user.roles,
            name: user.name,
            created_at: Utc::now(),
        };
        users.insert(user.email, record.clone());

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().await;
        let mut records: Vec<UserRecord> = users.values().cloned().collect();
        // HashMap iteration order is arbitrary; present a stable listing.
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.email.cmp(&b.email))
        });
        Ok(records)
    }

    async fn delete(&self, identifier: &str) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(identifier).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
