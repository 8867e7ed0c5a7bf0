/// User persistence capability
///
/// Credential verification and the user-facing routes only ever talk to the
/// [`UserStore`] trait; what actually holds the records is an implementation
/// detail. The crate ships [`MemoryUserStore`], which backs the demo binary
/// and the test suite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory;

pub use memory::MemoryUserStore;

/// Error type for user store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with the same identifier already exists.
    #[error("a user with this identifier already exists")]
    Duplicate,

    /// The backing store could not serve the request.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// A stored user account.
///
/// The password is held as an Argon2id PHC hash, never plaintext. Records
/// stay inside the store layer; anything shown to callers is mapped into a
/// response type first.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Email address: the unique identity key and token subject.
    pub email: String,

    /// Argon2id password hash (PHC string).
    pub password_hash: String,

    /// Comma-separated role names, e.g. `"USER,ADMIN"`.
    pub roles: String,

    /// Optional display name.
    pub name: Option<String>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Roles as an ordered list, split from the stored string.
    pub fn role_list(&self) -> Vec<String> {
        self.roles
            .split(',')
            .map(|role| role.trim().to_string())
            .filter(|role| !role.is_empty())
            .collect()
    }
}

/// Input for creating a new user. The creation timestamp is assigned by the
/// store.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address (must be unique).
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password).
    pub password_hash: String,

    /// Comma-separated role names.
    pub roles: String,

    /// Optional display name.
    pub name: Option<String>,
}

/// Persistence operations the rest of the system relies on.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by the unique identifier (email).
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<UserRecord>, StoreError>;

    /// Inserts a new user; `Duplicate` when the identifier is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Lists all users, oldest first.
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Deletes a user; `Ok(true)` when a record was removed.
    async fn delete(&self, identifier: &str) -> Result<bool, StoreError>;

    /// Checks that the store can currently serve requests.
    async fn ping(&self) -> Result<(), StoreError>;
}
