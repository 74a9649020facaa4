//! HTTP execution of the products query against the Admin GraphQL endpoint.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ShopifyConfig;

use super::ShopifyError;
use super::types::ProductsData;

/// The one query document this service issues.
///
/// Requests up to 50 variants per product and the inventory level for the
/// "available" state at a single location.
const PRODUCTS_WITH_INVENTORY: &str = r#"
query ProductsWithInventory($query: String!, $first: Int!, $after: String, $loc: ID!) {
  products(first: $first, after: $after, query: $query) {
    pageInfo { hasNextPage endCursor }
    nodes {
      id
      title
      handle
      vendor
      tags
      featuredImage { url }
      variants(first: 50) {
        nodes {
          id
          title
          sku
          availableForSale
          inventoryItem {
            inventoryLevel(locationId: $loc) {
              quantities(names: "available") {
                name
                quantity
              }
              location { id name }
            }
          }
        }
      }
    }
  }
}
"#;

/// GraphQL request envelope.
#[derive(Debug, Serialize)]
struct GraphQLRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<serde_json::Value>,
}

/// Variables for [`PRODUCTS_WITH_INVENTORY`].
#[derive(Debug, Serialize)]
struct ProductsVariables<'a> {
    query: &'a str,
    first: i64,
    after: Option<&'a str>,
    loc: &'a str,
}

/// Client for the Shopify Admin GraphQL API.
///
/// Cheap to clone; holds no per-request state and performs no caching.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    location_id: String,
}

impl ShopifyClient {
    /// Create a client from the Shopify configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.shop, config.api_version
        );
        Self::with_endpoint(
            endpoint,
            config.access_token.expose_secret(),
            config.location_id.clone(),
        )
    }

    /// Create a client against an explicit endpoint URL.
    ///
    /// [`Self::new`] derives the endpoint from the shop domain; this
    /// constructor exists for local mocks.
    #[must_use]
    pub fn with_endpoint(endpoint: String, access_token: &str, location_id: String) -> Self {
        Self {
            inner: Arc::new(ShopifyClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: access_token.to_string(),
                location_id,
            }),
        }
    }

    /// Fetch one page of products with inventory for the configured location.
    ///
    /// `query` is a Shopify search expression (see `catalog::build_search_query`),
    /// `first` the upstream page size, `after` the opaque forward cursor.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, GraphQL-level
    /// errors, or an undecodable/empty response body. Never retries.
    #[instrument(skip(self), fields(first = first))]
    pub async fn products_with_inventory(
        &self,
        query: &str,
        first: i64,
        after: Option<&str>,
    ) -> Result<ProductsData, ShopifyError> {
        let body = GraphQLRequest {
            query: PRODUCTS_WITH_INVENTORY,
            variables: ProductsVariables {
                query,
                first,
                after,
                loc: &self.inner.location_id,
            },
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        // An unparseable body degrades to an empty envelope: the request
        // fails with MissingData below instead of aborting the process.
        let envelope: GraphQLResponse<ProductsData> = serde_json::from_str(&response_text)
            .unwrap_or_else(|e| {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                GraphQLResponse {
                    data: None,
                    errors: None,
                }
            });

        if let Some(errors) = envelope.errors {
            return Err(ShopifyError::GraphQL(errors));
        }

        envelope.data.ok_or(ShopifyError::MissingData)
    }
}
