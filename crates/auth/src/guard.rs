//! Directory invariant guard.
//!
//! Centralised rule evaluator for directory-mutating operations. Runs after
//! the access policy has allowed the operation and before any write; a
//! violated rule aborts the mutation. The rules were previously scattered
//! across per-operation handlers; keeping them here makes each one
//! independently testable.
//!
//! Under concurrent creates the email check here is defense in depth only:
//! the store's unique constraint on email remains authoritative.

use keyward_core::{DomainError, DomainResult, UserId};

use crate::user::{Role, User, UserStatus};

/// Minimum plaintext password length accepted before hashing.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Requested field changes for an update. `None` leaves a field unchanged.
///
/// There is deliberately no `primary` field: the primary flag is set at
/// provisioning time and is not settable through any mutation API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.password.is_none()
    }
}

pub fn check_password_policy(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(
            "Password must be at least 6 characters.",
        ));
    }
    Ok(())
}

/// Create rules: email uniqueness (case-sensitive exact match) and the
/// password policy. `email_taken` is the result of a lookup against current
/// directory state; a retried create re-evaluates it.
pub fn check_create(email_taken: bool, password: &str) -> DomainResult<()> {
    if email_taken {
        return Err(DomainError::conflict("Email already registered."));
    }
    check_password_policy(password)
}

/// Update rules: the primary administrator's role is immutable, and an
/// update carrying zero recognised fields is an error, not a silent no-op.
pub fn check_update(target: &User, changes: &UserChanges) -> DomainResult<()> {
    if changes.is_empty() {
        return Err(DomainError::validation("No fields to update."));
    }

    if target.primary {
        if let Some(role) = changes.role {
            if role != Role::Admin {
                return Err(DomainError::conflict("Cannot change primary admin role."));
            }
        }
    }

    Ok(())
}

/// Delete rules: the primary administrator can never be deleted, and no
/// caller may delete their own account, admin or not.
pub fn check_delete(target: &User, actor: UserId) -> DomainResult<()> {
    if target.primary {
        return Err(DomainError::conflict(
            "Cannot delete primary administrator.",
        ));
    }
    if target.id == actor {
        return Err(DomainError::conflict("Cannot delete your own account."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn user(id: i64, role: Role, primary: bool) -> User {
        User {
            id: UserId::from_i64(id),
            name: "Root".to_string(),
            email: format!("user{id}@x.com"),
            password_hash: "$argon2id$opaque".to_string(),
            role,
            primary,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_rejects_taken_email() {
        let err = check_create(true, "secret1").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn create_rejects_short_password() {
        let err = check_create(false, "12345").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_accepts_fresh_email_and_valid_password() {
        assert!(check_create(false, "secret1").is_ok());
    }

    #[test]
    fn empty_update_is_rejected_as_error() {
        let target = user(1, Role::User, false);
        let err = check_update(&target, &UserChanges::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn primary_admin_role_cannot_be_downgraded() {
        let target = user(1, Role::Admin, true);
        let changes = UserChanges {
            role: Some(Role::User),
            ..Default::default()
        };
        let err = check_update(&target, &changes).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn primary_admin_may_keep_admin_role_and_change_other_fields() {
        let target = user(1, Role::Admin, true);
        let changes = UserChanges {
            name: Some("New Name".to_string()),
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert!(check_update(&target, &changes).is_ok());
    }

    #[test]
    fn non_primary_role_changes_are_allowed() {
        let target = user(2, Role::User, false);
        let changes = UserChanges {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert!(check_update(&target, &changes).is_ok());
    }

    #[test]
    fn primary_admin_cannot_be_deleted() {
        let target = user(1, Role::Admin, true);
        let err = check_delete(&target, UserId::from_i64(9)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn self_deletion_is_rejected_for_any_caller() {
        let target = user(3, Role::Admin, false);
        let err = check_delete(&target, UserId::from_i64(3)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn deleting_another_non_primary_user_is_allowed() {
        let target = user(3, Role::User, false);
        assert!(check_delete(&target, UserId::from_i64(1)).is_ok());
    }

    proptest! {
        /// A primary target is rejected for deletion regardless of actor,
        /// and a self-delete is rejected regardless of role or primacy.
        #[test]
        fn delete_protections_hold(target_id in 1i64..1000, actor_id in 1i64..1000, primary in any::<bool>()) {
            let target = user(target_id, Role::Admin, primary);
            let decision = check_delete(&target, UserId::from_i64(actor_id));
            if primary || target_id == actor_id {
                prop_assert!(decision.is_err());
            } else {
                prop_assert!(decision.is_ok());
            }
        }
    }
}
