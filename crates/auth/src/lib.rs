//! `keyward-auth`: pure authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage: hashing,
//! token issuance/verification, policy evaluation, and the directory
//! invariant guard are all side-effect free and independently testable.

pub mod claims;
pub mod guard;
pub mod password;
pub mod policy;
pub mod token;
pub mod user;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use guard::{MIN_PASSWORD_LEN, UserChanges, check_create, check_delete, check_update};
pub use password::{HashError, hash_password, verify_password};
pub use policy::{AccessDenied, Capability, authorize};
pub use token::{DEFAULT_TOKEN_TTL_HOURS, Hs256TokenService, TokenError};
pub use user::{PublicUser, Role, User, UserStatus};
