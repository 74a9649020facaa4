//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//!
//! The wire contract pins failures to a 500 with a `{ "error": "..." }` JSON
//! body, for both missing configuration and upstream failures, so no other
//! status codes are introduced here.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::shopify::ShopifyError;

/// Application-level error type for the catalog API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration was absent when the request arrived.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The upstream Shopify call failed.
    #[error("{0}")]
    Shopify(#[from] ShopifyError),
}

/// JSON error body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Messages stay descriptive on purpose: the body names the missing
        // settings or carries the upstream status/payload, which is what the
        // operator sees first when the proxy misbehaves.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config(ConfigError::MissingEnvVars(vec![
            "SHOPIFY_SHOP".to_string(),
        ]));
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: SHOPIFY_SHOP"
        );
    }

    #[test]
    fn test_errors_map_to_500() {
        let response = AppError::Config(ConfigError::MissingEnvVars(vec![
            "SHOPIFY_TOKEN".to_string(),
        ]))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Shopify(ShopifyError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
