//! HTTP routes, one file per area.

use axum::Router;

pub mod auth;
pub mod system;
pub mod users;

/// Routes reachable without a token: login, registration, liveness.
pub fn public_router() -> Router {
    Router::new()
        .merge(auth::public_router())
        .merge(system::router())
}

/// Routes behind the bearer middleware.
pub fn protected_router() -> Router {
    Router::new()
        .merge(auth::protected_router())
        .merge(users::router())
}
