//! Liveness endpoint.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use chrono::Utc;
use serde_json::json;

pub fn router() -> Router {
    Router::new().route("/api/health", get(health))
}

pub async fn health() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "keyward is running",
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
