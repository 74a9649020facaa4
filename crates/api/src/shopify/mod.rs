//! Shopify Admin API GraphQL client.
//!
//! # Architecture
//!
//! - One fixed query document (`ProductsWithInventory`), executed over plain
//!   `reqwest` with a serde-typed request/response envelope
//! - Shopify is source of truth - no local sync, no caching, one outbound
//!   call per incoming request
//! - Strict decode at the boundary: the response shape is typed in
//!   [`types`], with optional nesting expressed as `Option` rather than
//!   defaulting scattered through the mapping code

mod client;
pub mod types;

pub use client::ShopifyClient;

use thiserror::Error;

/// Errors that can occur when talking to the Shopify Admin API.
///
/// No variant is retried; every failure is terminal for the request that
/// triggered the call.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("Shopify HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP response, wrapped with status and body.
    #[error("Shopify HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL-level errors despite a 2xx response, payload serialized into
    /// the message.
    #[error("Shopify GraphQL errors: {0}")]
    GraphQL(serde_json::Value),

    /// The response parsed to an envelope with neither data nor errors
    /// (including the case where the body was not valid JSON at all).
    #[error("Shopify response contained no data")]
    MissingData,
}
