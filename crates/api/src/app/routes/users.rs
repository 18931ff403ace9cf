//! User directory administration endpoints (admin only).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use keyward_auth::{Capability, SessionClaims, authorize};
use keyward_core::UserId;

use crate::app::dto::{self, CreateUserRequest, UpdateUserRequest};
use crate::app::{AppServices, errors, session};

pub fn router() -> Router {
    Router::new()
        .route("/api/users", get(list).post(create))
        .route("/api/users/:id", put(update).delete(remove))
}

/// GET /api/users
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<SessionClaims>,
) -> axum::response::Response {
    if let Err(e) = authorize(Some(&claims), Capability::AdminOnly) {
        return errors::access_denied_to_response(e);
    }

    match session::list_users(&services).await {
        Ok(users) => {
            let users: Vec<_> = users.iter().map(dto::user_to_json).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "count": users.len(),
                    "users": users,
                })),
            )
                .into_response()
        }
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// POST /api/users
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<CreateUserRequest>,
) -> axum::response::Response {
    if let Err(e) = authorize(Some(&claims), Capability::AdminOnly) {
        return errors::access_denied_to_response(e);
    }

    match session::create_user(&services, &req.name, &req.email, &req.password, req.role).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "User created successfully.",
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// PUT /api/users/:id
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> axum::response::Response {
    if let Err(e) = authorize(Some(&claims), Capability::AdminOnly) {
        return errors::access_denied_to_response(e);
    }

    match session::update_user(&services, UserId::from_i64(id), req.into_changes()).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "User updated successfully.",
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// DELETE /api/users/:id
pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    if let Err(e) = authorize(Some(&claims), Capability::AdminOnly) {
        return errors::access_denied_to_response(e);
    }

    match session::delete_user(&services, UserId::from_i64(id), claims.sub).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "User deleted successfully.",
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}
