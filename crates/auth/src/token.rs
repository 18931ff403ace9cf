//! Stateless HS256 session tokens.
//!
//! Tokens are signed with a server-held secret and bound to an absolute
//! expiry. There is no server-side store of issued tokens and therefore no
//! revocation primitive: expiry is the only bound on token lifetime. A
//! stolen token remains valid until expiry regardless of password change or
//! logout.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{SessionClaims, validate_claims};
use crate::user::User;

/// Default session lifetime when none is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Verification failed. Deliberately carries no detail: bad signature,
    /// malformed payload, and expiry are indistinguishable to the caller.
    #[error("token rejected")]
    Invalid,

    #[error("failed to encode token")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256-signed session tokens.
#[derive(Clone)]
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Derive claims from an identity and sign them.
    ///
    /// The returned token is opaque to the caller and carried as a bearer
    /// credential on every authenticated request.
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            primary: user.primary,
            issued_at: now,
            expires_at: now + self.ttl,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)
    }

    /// Verify a token: signature integrity first, then the claims window.
    ///
    /// Signature or structural failure rejects the token without inspecting
    /// payload semantics. Every failure collapses to [`TokenError::Invalid`]
    /// so callers see a single unauthenticated outcome.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        // Expiry is checked by `validate_claims` after the signature, so the
        // decoder's own time validation is disabled.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;

        validate_claims(&data.claims, now).map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Role, UserStatus};
    use keyward_core::UserId;

    fn test_user(id: i64, role: Role) -> User {
        User {
            id: UserId::from_i64(id),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password_hash: "$argon2id$opaque".to_string(),
            role,
            primary: false,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(secret: &str) -> Hs256TokenService {
        Hs256TokenService::new(secret.as_bytes(), Duration::hours(1))
    }

    #[test]
    fn issue_then_verify_returns_the_issued_claims() {
        let svc = service("test-secret");
        let user = test_user(42, Role::Admin);
        let now = Utc::now();

        let token = svc.issue(&user, now).unwrap();
        let claims = svc.verify(&token, now).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Admin);
        assert!(!claims.primary);
        // Unix-second serialisation truncates sub-second precision.
        assert_eq!(claims.issued_at.timestamp(), now.timestamp());
        assert_eq!(
            claims.expires_at.timestamp(),
            (now + Duration::hours(1)).timestamp()
        );
    }

    #[test]
    fn verify_rejects_after_expiry() {
        let svc = service("test-secret");
        let issued = Utc::now();
        let token = svc.issue(&test_user(1, Role::User), issued).unwrap();

        let later = issued + Duration::hours(2);
        assert!(matches!(svc.verify(&token, later), Err(TokenError::Invalid)));
    }

    #[test]
    fn verify_rejects_a_token_signed_with_another_secret() {
        let now = Utc::now();
        let token = service("secret-a")
            .issue(&test_user(1, Role::User), now)
            .unwrap();

        assert!(matches!(
            service("secret-b").verify(&token, now),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn verify_rejects_garbage_without_panicking() {
        let svc = service("test-secret");
        let now = Utc::now();

        for garbage in ["", "a", "a.b", "a.b.c", "Bearer xyz", "…"] {
            assert!(matches!(svc.verify(garbage, now), Err(TokenError::Invalid)));
        }
    }

    #[test]
    fn verify_rejects_a_truncated_token() {
        let svc = service("test-secret");
        let now = Utc::now();
        let token = svc.issue(&test_user(1, Role::User), now).unwrap();

        let truncated = &token[..token.len() - 5];
        assert!(matches!(svc.verify(truncated, now), Err(TokenError::Invalid)));
    }
}
