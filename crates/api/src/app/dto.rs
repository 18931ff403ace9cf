//! Request DTOs and JSON mapping helpers.

use serde::Deserialize;

use keyward_auth::{PublicUser, Role, UserChanges, UserStatus};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

/// Partial update body; absent fields stay unchanged. An all-absent body is
/// rejected downstream by the invariant guard.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            name: self.name,
            email: self.email,
            role: self.role,
            status: self.status,
            password: self.password,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(user: &PublicUser) -> serde_json::Value {
    // PublicUser's serde shape is the wire shape; no hash field exists on it.
    serde_json::json!(user)
}
