//! Session and directory flows.
//!
//! Orchestration of the auth core: each flow validates input, consults the
//! invariant guard against current directory state, then persists. All
//! failures are terminal for the request; nothing here retries internally.

use chrono::Utc;
use thiserror::Error;

use keyward_auth::{
    HashError, PublicUser, Role, TokenError, UserChanges, UserStatus, check_create, check_delete,
    check_update, hash_password, verify_password,
};
use keyward_core::{DomainError, UserId};
use keyward_infra::{NewUserRecord, StoreError, UserRecordChanges};

use super::services::AppServices;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<StoreError> for FlowError {
    fn from(err: StoreError) -> Self {
        match err {
            // The constraint fires when two creates race past the guard's
            // pre-check; the second caller sees an ordinary conflict.
            StoreError::UniqueViolation(_) => {
                Self::Domain(DomainError::conflict("Email already registered."))
            }
            other => Self::Store(other),
        }
    }
}

/// Login: verify credentials and issue a session token.
///
/// Unknown email, inactive account, and wrong password collapse into one
/// uniform failure so callers cannot probe which check failed.
pub async fn login(
    services: &AppServices,
    email: &str,
    password: &str,
) -> Result<(String, PublicUser), FlowError> {
    if email.is_empty() || password.is_empty() {
        return Err(DomainError::validation("Email and password are required.").into());
    }

    let user = services
        .store
        .find_by_email(email)
        .await?
        .filter(|u| u.is_active())
        .ok_or(DomainError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(DomainError::InvalidCredentials.into());
    }

    let token = services.tokens.issue(&user, Utc::now())?;
    tracing::info!(user_id = %user.id, "login succeeded");
    Ok((token, user.to_public()))
}

/// Self-service registration, auto-logged-in on success.
///
/// The role is never caller-supplied on this path: every registration is a
/// non-primary `User`.
pub async fn register(
    services: &AppServices,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(String, PublicUser), FlowError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(DomainError::validation("Name, email, and password are required.").into());
    }

    let email_taken = services.store.find_by_email(email).await?.is_some();
    check_create(email_taken, password)?;

    let password_hash = hash_password(password)?;
    let user = services
        .store
        .insert(NewUserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::User,
            status: UserStatus::Active,
        })
        .await?;

    let token = services.tokens.issue(&user, Utc::now())?;
    tracing::info!(user_id = %user.id, "registration succeeded");
    Ok((token, user.to_public()))
}

/// Resolve the calling identity from its claims.
///
/// This is the only path that re-synchronizes stale claims against current
/// directory state: an identity deleted since issuance reports not-found.
pub async fn who_am_i(services: &AppServices, subject: UserId) -> Result<PublicUser, FlowError> {
    let user = services
        .store
        .find_by_id(subject)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(user.to_public())
}

pub async fn list_users(services: &AppServices) -> Result<Vec<PublicUser>, FlowError> {
    let users = services.store.list().await?;
    Ok(users.iter().map(|u| u.to_public()).collect())
}

/// Admin-initiated creation. Unlike registration, the role may be supplied;
/// the primary flag may not.
pub async fn create_user(
    services: &AppServices,
    name: &str,
    email: &str,
    password: &str,
    role: Option<Role>,
) -> Result<PublicUser, FlowError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(DomainError::validation("Name, email, and password are required.").into());
    }

    let email_taken = services.store.find_by_email(email).await?.is_some();
    check_create(email_taken, password)?;

    let password_hash = hash_password(password)?;
    let user = services
        .store
        .insert(NewUserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: role.unwrap_or(Role::User),
            status: UserStatus::Active,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(user.to_public())
}

/// Partial update of a directory entry, guarded against invariant
/// violations. A password change is re-hashed here; the plaintext never
/// reaches the store.
pub async fn update_user(
    services: &AppServices,
    id: UserId,
    changes: UserChanges,
) -> Result<PublicUser, FlowError> {
    let target = services
        .store
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    check_update(&target, &changes)?;

    let password_hash = match &changes.password {
        Some(plaintext) => Some(hash_password(plaintext)?),
        None => None,
    };

    let updated = services
        .store
        .update(
            id,
            UserRecordChanges {
                name: changes.name,
                email: changes.email,
                role: changes.role,
                status: changes.status,
                password_hash,
            },
        )
        .await?
        .ok_or(DomainError::NotFound)?;

    tracing::info!(user_id = %updated.id, "user updated");
    Ok(updated.to_public())
}

pub async fn delete_user(
    services: &AppServices,
    id: UserId,
    actor: UserId,
) -> Result<(), FlowError> {
    let target = services
        .store
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    check_delete(&target, actor)?;

    if !services.store.delete(id).await? {
        return Err(DomainError::NotFound.into());
    }

    tracing::info!(user_id = %id, "user deleted");
    Ok(())
}
