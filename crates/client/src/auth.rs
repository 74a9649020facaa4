//! Credential acquisition seam.
//!
//! The catalog API expects a bearer token from the caller's identity
//! provider. How that token is obtained (silent refresh, popup, redirect,
//! device code) is the provider's business; callers of this crate see one
//! async `token()` method and one error distinguishing "user interaction
//! needed" from everything else.

use std::future::Future;

use secrecy::SecretString;
use thiserror::Error;

/// Errors from credential acquisition.
///
/// Kept distinct from data-fetch errors so a UI can route them to a login
/// prompt rather than a generic failure state.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Silent acquisition failed; an interactive sign-in step is required.
    #[error("interactive sign-in required")]
    AuthRequired,

    /// The identity provider rejected the request outright.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// A source of bearer credentials for the catalog API.
///
/// Implementations should try silent acquisition first and surface
/// [`AuthError::AuthRequired`] when only an interactive flow can proceed;
/// the caller decides how to run that flow and then retries.
pub trait TokenProvider: Send + Sync {
    /// Obtain a currently-valid access token.
    fn token(&self) -> impl Future<Output = Result<SecretString, AuthError>> + Send;
}

/// A provider that always returns the same fixed token.
///
/// Suitable for server-to-server callers holding a long-lived credential,
/// and for tests.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Wrap a fixed access token.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SecretString::from(token),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<SecretString, AuthError> {
        Ok(self.token.clone())
    }
}
