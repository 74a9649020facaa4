//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET /health    - Liveness check, always 200
//! GET /products  - Filtered, paginated product search
//! ```
//!
//! Bearer tokens on inbound requests are validated by the hosting layer;
//! these handlers trust the request and attach no auth middleware.

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the catalog API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/products", get(products::products))
}
