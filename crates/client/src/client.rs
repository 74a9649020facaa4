//! HTTP access to the catalog API with bearer attachment.

use clinic_catalog_core::ProductPage;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::auth::{AuthError, TokenProvider};

/// Errors from fetching catalog pages.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential acquisition failed; no data request was issued.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Transport-level failure or undecodable response body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error body.
    #[error("catalog API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

/// Error body shape of the catalog API (`{ "error": "..." }`).
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Client for the catalog API.
///
/// Obtains a credential from the provider before every request and attaches
/// it as `Authorization: Bearer`; the data call is never issued without one.
pub struct CatalogClient<P> {
    http: reqwest::Client,
    base_url: Url,
    provider: P,
}

impl<P: TokenProvider> CatalogClient<P> {
    /// Create a client for the API at `base_url`.
    ///
    /// A missing trailing slash on the base path is corrected so endpoint
    /// joins keep the full path.
    #[must_use]
    pub fn new(mut base_url: Url, provider: P) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            provider,
        }
    }

    /// Fetch one page of catalog results.
    ///
    /// `after` is the `endCursor` of the previous page, or `None` for the
    /// first page. An empty `query` lists the whole active catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if no credential could be obtained
    /// (before any network traffic), [`ClientError::Api`] for error
    /// responses from the service, and [`ClientError::Http`] for transport
    /// failures.
    #[instrument(skip(self), fields(first = first))]
    pub async fn fetch_page(
        &self,
        query: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<ProductPage, ClientError> {
        let token = self.provider.token().await?;

        let mut url = self
            .base_url
            .join("products")
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("first", &first.to_string());
            if !query.is_empty() {
                pairs.append_pair("query", query);
            }
            if let Some(cursor) = after {
                pairs.append_pair("after", cursor);
            }
        }

        let response = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map_or_else(|_| format!("HTTP {status}"), |body| body.error);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ProductPage>().await?)
    }
}
