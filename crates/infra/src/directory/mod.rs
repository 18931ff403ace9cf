//! Directory store seam.

use async_trait::async_trait;
use thiserror::Error;

use keyward_auth::{Role, User, UserStatus};
use keyward_core::UserId;

mod memory;
mod postgres;

pub use memory::InMemoryDirectoryStore;
pub use postgres::PostgresDirectoryStore;

/// Storage-level failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (named column). Under concurrent
    /// creates this is the authoritative email-uniqueness enforcement; the
    /// invariant guard's lookup is only a pre-check.
    #[error("unique constraint violated on {0}")]
    UniqueViolation(&'static str),

    /// A stored row could not be decoded into a domain value.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

/// Fields for a new directory row.
///
/// There is no `primary` field: the primary-admin flag is set only by
/// provisioning, never through this interface.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Partial update of a directory row. `None` leaves the column unchanged.
/// Passwords arrive here already hashed; plaintext never reaches the store.
#[derive(Debug, Clone, Default)]
pub struct UserRecordChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub password_hash: Option<String>,
}

/// The user directory as seen by the core.
///
/// Implementations must provide atomic single-row update/delete and a
/// uniqueness constraint on `email`.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Case-sensitive exact match on email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError>;

    /// Returns the updated row, or `None` if the id does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: UserRecordChanges,
    ) -> Result<Option<User>, StoreError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;

    /// All identities, newest first.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}
