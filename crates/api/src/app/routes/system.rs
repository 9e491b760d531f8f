//! Liveness probe.

use axum::{Json, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

/// Plain probe payload, deliberately outside the response envelope so
/// monitors can match on it directly.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
    }))
}
