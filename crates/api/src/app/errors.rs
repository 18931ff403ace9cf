//! Consistent error responses.
//!
//! Every failure body is `{ "success": false, "message": ... }`. Store and
//! crypto failures are logged with detail but surface as a generic server
//! error; domain denials carry their own message and never leak which
//! internal check failed beyond what the taxonomy allows.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use keyward_auth::AccessDenied;
use keyward_core::DomainError;

use crate::app::session::FlowError;

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// The single 401 body used for every token failure.
pub fn unauthenticated_response() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        DomainError::Unauthenticated.to_string(),
    )
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthenticated | DomainError::InvalidCredentials => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotFound => StatusCode::NOT_FOUND,
    };
    json_error(status, err.to_string())
}

pub fn access_denied_to_response(err: AccessDenied) -> axum::response::Response {
    let status = match err {
        AccessDenied::Unauthenticated => StatusCode::UNAUTHORIZED,
        AccessDenied::AdminRequired | AccessDenied::NotSelf => StatusCode::FORBIDDEN,
    };
    json_error(status, err.to_string())
}

pub fn flow_error_to_response(err: FlowError) -> axum::response::Response {
    match err {
        FlowError::Domain(e) => domain_error_to_response(e),
        FlowError::Store(e) => {
            tracing::error!(error = %e, "directory store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
        FlowError::Hash(e) => {
            tracing::error!(error = %e, "password hashing failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
        FlowError::Token(e) => {
            tracing::error!(error = %e, "token issuance failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}
