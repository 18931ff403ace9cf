//! Bearer-token authentication middleware.
//!
//! Extracts the `Authorization: Bearer` credential, verifies it through the
//! token service, and makes the resulting claims available to handlers as a
//! request extension. Every failure (missing header, malformed header, bad
//! signature, malformed payload, expiry) produces the same 401 body.

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use keyward_auth::Hs256TokenService;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Hs256TokenService,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token =
        extract_bearer(req.headers()).ok_or_else(errors::unauthenticated_response)?;

    let claims = state
        .tokens
        .verify(token, Utc::now())
        .map_err(|_| errors::unauthenticated_response())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}
