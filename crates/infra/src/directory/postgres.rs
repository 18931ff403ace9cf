//! Postgres-backed directory store.
//!
//! Email uniqueness is enforced by a unique constraint on `users.email`;
//! constraint violations are classified so the caller can surface a
//! conflict instead of a generic server error.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::error::ErrorKind;

use async_trait::async_trait;
use keyward_auth::User;
use keyward_core::UserId;

use super::{DirectoryStore, NewUserRecord, StoreError, UserRecordChanges};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, is_primary_admin, status, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_primary_admin: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_i64(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: row
                .role
                .parse()
                .map_err(|_| StoreError::Corrupt(format!("role '{}' on id {}", row.role, row.id)))?,
            primary: row.is_primary_admin,
            status: row.status.parse().map_err(|_| {
                StoreError::Corrupt(format!("status '{}' on id {}", row.status, row.id))
            })?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.kind() == ErrorKind::UniqueViolation {
            return StoreError::UniqueViolation("email");
        }
    }
    StoreError::Database(err)
}

pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PostgresDirectoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (name, email, password_hash, role, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.role.to_string())
        .bind(record.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        tracing::debug!(user_id = row.id, "directory row inserted");
        User::try_from(row)
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserRecordChanges,
    ) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role), \
                status = COALESCE($5, status), \
                password_hash = COALESCE($6, password_hash), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.role.map(|r| r.to_string()))
        .bind(changes.status.map(|s| s.to_string()))
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}
