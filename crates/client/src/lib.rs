//! Clinic Catalog Client - session/fetch layer for the catalog API.
//!
//! # Architecture
//!
//! - [`auth::TokenProvider`] abstracts credential acquisition: a provider
//!   refreshes silently when it can and fails with
//!   [`auth::AuthError::AuthRequired`] when an interactive step is needed.
//!   In a browser host that step is a popup or redirect; elsewhere it might
//!   be a device-code flow. This crate only sees the single `token()` seam.
//! - [`CatalogClient`] attaches the credential as a bearer header and never
//!   issues a data request without one.
//! - [`ProductFeed`] tracks incremental pagination state: a new search
//!   resets the accumulated items, "load more" appends the next page.
//!
//! # Example
//!
//! ```rust,ignore
//! use clinic_catalog_client::{CatalogClient, ProductFeed, StaticTokenProvider};
//!
//! let provider = StaticTokenProvider::new("eyJ...".into());
//! let client = CatalogClient::new("https://catalog.example/api/".parse()?, provider);
//!
//! let mut feed = ProductFeed::new(20);
//! feed.search(&client, "sérum").await?;
//! while feed.has_more() {
//!     feed.load_more(&client).await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
mod client;
mod feed;

pub use auth::{AuthError, StaticTokenProvider, TokenProvider};
pub use client::{CatalogClient, ClientError};
pub use feed::ProductFeed;
