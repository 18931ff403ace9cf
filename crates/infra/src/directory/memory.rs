//! In-memory directory store for tests and local development.
//!
//! Mirrors the Postgres contract, including the uniqueness constraint on
//! email and newest-first listing.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use keyward_auth::User;
use keyward_core::UserId;

use super::{DirectoryStore, NewUserRecord, StoreError, UserRecordChanges};

#[derive(Debug)]
pub struct InMemoryDirectoryStore {
    inner: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a fully-formed identity, bypassing the mutation interface.
    ///
    /// This is the provisioning path: it is the only way a `primary = true`
    /// row comes to exist, matching the production schema seed.
    pub fn seed(&self, user: User) {
        let id = user.id.as_i64();
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        self.inner.write().unwrap().insert(id, user);
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let map = self.inner.read().unwrap();
        Ok(map.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let map = self.inner.read().unwrap();
        Ok(map.get(&id.as_i64()).cloned())
    }

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let mut map = self.inner.write().unwrap();

        // The write lock makes this check-then-insert atomic, standing in
        // for the Postgres unique constraint.
        if map.values().any(|u| u.email == record.email) {
            return Err(StoreError::UniqueViolation("email"));
        }

        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: UserId::from_i64(id),
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            role: record.role,
            primary: false,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        map.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserRecordChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut map = self.inner.write().unwrap();

        if let Some(email) = &changes.email {
            if map
                .values()
                .any(|u| u.email == *email && u.id != id)
            {
                return Err(StoreError::UniqueViolation("email"));
            }
        }

        let Some(user) = map.get_mut(&id.as_i64()) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().unwrap();
        Ok(map.remove(&id.as_i64()).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let map = self.inner.read().unwrap();
        let mut users: Vec<User> = map.values().cloned().collect();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.as_i64().cmp(&a.id.as_i64()))
        });
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyward_auth::{Role, UserStatus};

    fn record(name: &str, email: &str) -> NewUserRecord {
        NewUserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$opaque".to_string(),
            role: Role::User,
            status: UserStatus::Active,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryDirectoryStore::new();
        let a = store.insert(record("Ann", "ann@x.com")).await.unwrap();
        let b = store.insert(record("Bob", "bob@x.com")).await.unwrap();
        assert!(b.id.as_i64() > a.id.as_i64());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = InMemoryDirectoryStore::new();
        store.insert(record("Ann", "ann@x.com")).await.unwrap();

        let err = store.insert(record("Ann2", "ann@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation("email")));

        // Exactly one row survives.
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = InMemoryDirectoryStore::new();
        store.insert(record("Ann", "ann@x.com")).await.unwrap();

        assert!(store.find_by_email("Ann@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("ann@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_to_taken_email_is_rejected() {
        let store = InMemoryDirectoryStore::new();
        let ann = store.insert(record("Ann", "ann@x.com")).await.unwrap();
        store.insert(record("Bob", "bob@x.com")).await.unwrap();

        let err = store
            .update(
                ann.id,
                UserRecordChanges {
                    email: Some("bob@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation("email")));
    }

    #[tokio::test]
    async fn update_missing_id_returns_none() {
        let store = InMemoryDirectoryStore::new();
        let updated = store
            .update(
                UserId::from_i64(99),
                UserRecordChanges {
                    name: Some("Nobody".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let store = InMemoryDirectoryStore::new();
        let ann = store.insert(record("Ann", "ann@x.com")).await.unwrap();

        assert!(store.delete(ann.id).await.unwrap());
        assert!(!store.delete(ann.id).await.unwrap());
    }
}
