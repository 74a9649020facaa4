//! Liveness health check endpoint.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// ISO-8601 timestamp of the check.
    pub ts: String,
}

/// `GET /health`.
///
/// Always returns 200, independent of configuration state or upstream
/// availability.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
