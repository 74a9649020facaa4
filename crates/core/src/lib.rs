//! Clinic Catalog Core - Shared types library.
//!
//! This crate provides the types used across the clinic catalog components:
//! - `api` - The catalog query service (HTTP + Shopify proxy)
//! - `client` - The session/fetch layer consumed by frontends
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Wire types for the `/products` JSON contract
//! - [`text`] - Case/diacritic-insensitive normalization primitive

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use types::*;
