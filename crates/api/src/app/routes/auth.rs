//! Authentication endpoints: login, registration, identity resolution.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use keyward_auth::{Capability, SessionClaims, authorize};

use crate::app::dto::{self, LoginRequest, RegisterRequest};
use crate::app::{AppServices, errors, session};

pub fn public_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
}

pub fn protected_router() -> Router {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
}

/// POST /api/auth/login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<LoginRequest>,
) -> axum::response::Response {
    match session::login(&services, &req.email, &req.password).await {
        Ok((token, user)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "token": token,
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// POST /api/auth/register
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<RegisterRequest>,
) -> axum::response::Response {
    match session::register(&services, &req.name, &req.email, &req.password).await {
        Ok((token, user)) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Account created successfully!",
                "token": token,
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// GET /api/auth/me: resolve the caller against current directory state.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<SessionClaims>,
) -> axum::response::Response {
    let target = claims.sub;
    if let Err(e) = authorize(Some(&claims), Capability::SelfOrAdmin { target }) {
        return errors::access_denied_to_response(e);
    }

    match session::who_am_i(&services, target).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::flow_error_to_response(e),
    }
}

/// POST /api/auth/logout
///
/// Sessions are stateless: there is nothing to invalidate server-side, so
/// logout is the client forgetting its token. The endpoint exists so
/// clients have a uniform call to make.
pub async fn logout(Extension(claims): Extension<SessionClaims>) -> axum::response::Response {
    if let Err(e) = authorize(Some(&claims), Capability::Authenticated) {
        return errors::access_denied_to_response(e);
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Logged out successfully.",
        })),
    )
        .into_response()
}
