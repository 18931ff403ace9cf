//! Access policy evaluation.
//!
//! Pure decision logic: given (possibly absent) session claims, a required
//! capability, and optionally a target identity, yield allow or deny with a
//! reason tag. No IO, no side effects.

use thiserror::Error;

use keyward_core::UserId;

use crate::claims::SessionClaims;
use crate::user::Role;

/// Capability an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Verified session claims must be present.
    Authenticated,

    /// Claims role must be `Admin`.
    AdminOnly,

    /// Claims subject must equal the target id, or claims role must be
    /// `Admin`.
    SelfOrAdmin { target: UserId },
}

/// Reason a request was denied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("Access denied. No token provided.")]
    Unauthenticated,

    #[error("Access denied. Admin privileges required.")]
    AdminRequired,

    #[error("Access denied. Not your account.")]
    NotSelf,
}

/// Authorize claims against a required capability.
///
/// Authentication is checked before any role or ownership rule; absent
/// claims always deny, whatever the capability.
pub fn authorize(
    claims: Option<&SessionClaims>,
    capability: Capability,
) -> Result<(), AccessDenied> {
    let claims = claims.ok_or(AccessDenied::Unauthenticated)?;

    match capability {
        Capability::Authenticated => Ok(()),
        Capability::AdminOnly => {
            if claims.role == Role::Admin {
                Ok(())
            } else {
                Err(AccessDenied::AdminRequired)
            }
        }
        Capability::SelfOrAdmin { target } => {
            if claims.sub == target || claims.role == Role::Admin {
                Ok(())
            } else {
                Err(AccessDenied::NotSelf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn claims(sub: i64, role: Role) -> SessionClaims {
        let now = Utc::now();
        SessionClaims {
            sub: UserId::from_i64(sub),
            email: format!("user{sub}@x.com"),
            role,
            primary: false,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn absent_claims_deny_every_capability() {
        for cap in [
            Capability::Authenticated,
            Capability::AdminOnly,
            Capability::SelfOrAdmin {
                target: UserId::from_i64(1),
            },
        ] {
            assert_eq!(authorize(None, cap), Err(AccessDenied::Unauthenticated));
        }
    }

    #[test]
    fn authenticated_allows_any_valid_claims() {
        let c = claims(1, Role::User);
        assert_eq!(authorize(Some(&c), Capability::Authenticated), Ok(()));
    }

    #[test]
    fn admin_only_denies_non_admin() {
        let c = claims(1, Role::User);
        assert_eq!(
            authorize(Some(&c), Capability::AdminOnly),
            Err(AccessDenied::AdminRequired)
        );
    }

    #[test]
    fn self_or_admin_allows_the_subject_itself() {
        let c = claims(5, Role::User);
        let cap = Capability::SelfOrAdmin {
            target: UserId::from_i64(5),
        };
        assert_eq!(authorize(Some(&c), cap), Ok(()));
    }

    #[test]
    fn self_or_admin_denies_another_subject() {
        let c = claims(5, Role::User);
        let cap = Capability::SelfOrAdmin {
            target: UserId::from_i64(6),
        };
        assert_eq!(authorize(Some(&c), cap), Err(AccessDenied::NotSelf));
    }

    proptest! {
        /// Admin claims are allowed every capability, for any subject/target.
        #[test]
        fn admin_is_never_denied(sub in 1i64..10_000, target in 1i64..10_000) {
            let c = claims(sub, Role::Admin);
            prop_assert_eq!(authorize(Some(&c), Capability::Authenticated), Ok(()));
            prop_assert_eq!(authorize(Some(&c), Capability::AdminOnly), Ok(()));
            prop_assert_eq!(
                authorize(Some(&c), Capability::SelfOrAdmin { target: UserId::from_i64(target) }),
                Ok(())
            );
        }

        /// Non-admin claims never pass `AdminOnly`, and pass `SelfOrAdmin`
        /// exactly when the target is their own id.
        #[test]
        fn non_admin_is_bounded_by_ownership(sub in 1i64..10_000, target in 1i64..10_000) {
            let c = claims(sub, Role::User);
            prop_assert_eq!(
                authorize(Some(&c), Capability::AdminOnly),
                Err(AccessDenied::AdminRequired)
            );

            let decision = authorize(
                Some(&c),
                Capability::SelfOrAdmin { target: UserId::from_i64(target) },
            );
            if sub == target {
                prop_assert_eq!(decision, Ok(()));
            } else {
                prop_assert_eq!(decision, Err(AccessDenied::NotSelf));
            }
        }
    }
}
