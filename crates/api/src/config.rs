//! Catalog API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (Shopify access)
//! - `SHOPIFY_SHOP` - Shop domain (e.g., clinic-boutique.myshopify.com)
//! - `SHOPIFY_TOKEN` - Admin API access token (shpat_...)
//! - `CLINIC_LOCATION_ID` - Inventory location GID (gid://shopify/Location/...)
//!
//! ## Optional
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-07)
//! - `FEATURE_TOPDOCTORES_TAG` - Marker tag for "top" products
//!   (`FEATURE_TOPDOCTORS_TAG` is accepted as a fallback spelling;
//!   default: topdoctores)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Missing Shopify settings are not fatal at startup: the process still
//! serves `/health`, and `/products` reports the stored configuration error
//! on every request until the settings are fixed.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Fallback marker tag when neither tag variable is set.
const DEFAULT_TOP_TAG: &str = "topdoctores";

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server-level configuration. Every field has a default, so loading this
/// only fails on unparseable values, never on absence.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shop domain (e.g., clinic-boutique.myshopify.com)
    pub shop: String,
    /// Admin API version (e.g., 2024-07)
    pub api_version: String,
    /// Admin API access token
    pub access_token: SecretString,
    /// Inventory location GID whose stock levels are served
    pub location_id: String,
    /// Marker tag for "top" products, stored lowercased
    pub top_tag: String,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("shop", &self.shop)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("location_id", &self.location_id)
            .field("top_tag", &self.top_tag)
            .finish()
    }
}

impl CatalogConfig {
    /// Load server configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_HOST` or `CATALOG_PORT` are present
    /// but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CATALOG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CATALOG_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_PORT".to_string(), e.to_string()))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    /// Load Shopify configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVars` naming every absent required
    /// variable in one message, so a misdeployed instance reports the full
    /// picture instead of one variable at a time.
    pub fn from_env() -> Result<Self, ConfigError> {
        let shop = get_optional_env("SHOPIFY_SHOP");
        let access_token = get_optional_env("SHOPIFY_TOKEN");
        let location_id = get_optional_env("CLINIC_LOCATION_ID");

        let mut missing = Vec::new();
        if shop.is_none() {
            missing.push("SHOPIFY_SHOP".to_string());
        }
        if access_token.is_none() {
            missing.push("SHOPIFY_TOKEN".to_string());
        }
        if location_id.is_none() {
            missing.push("CLINIC_LOCATION_ID".to_string());
        }
        let (Some(shop), Some(access_token), Some(location_id)) =
            (shop, access_token, location_id)
        else {
            return Err(ConfigError::MissingEnvVars(missing));
        };

        // Both spellings occur in deployed app settings; the accented-language
        // one wins when both are set.
        let top_tag = get_optional_env("FEATURE_TOPDOCTORES_TAG")
            .or_else(|| get_optional_env("FEATURE_TOPDOCTORS_TAG"))
            .unwrap_or_else(|| DEFAULT_TOP_TAG.to_string())
            .to_lowercase();

        Ok(Self {
            shop,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2024-07"),
            access_token: SecretString::from(access_token),
            location_id,
            top_tag,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_vars_message_names_all_settings() {
        let err = ConfigError::MissingEnvVars(vec![
            "SHOPIFY_SHOP".to_string(),
            "SHOPIFY_TOKEN".to_string(),
            "CLINIC_LOCATION_ID".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: SHOPIFY_SHOP, SHOPIFY_TOKEN, CLINIC_LOCATION_ID"
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = CatalogConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyConfig {
            shop: "clinic-boutique.myshopify.com".to_string(),
            api_version: "2024-07".to_string(),
            access_token: SecretString::from("shpat_super_secret_value"),
            location_id: "gid://shopify/Location/1".to_string(),
            top_tag: "topdoctores".to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("clinic-boutique.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_secret_value"));
    }
}
