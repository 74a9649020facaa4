//! Clinic Catalog API library.
//!
//! This crate provides the catalog query service as a library, allowing it
//! to be tested in-process and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod shopify;
pub mod state;
