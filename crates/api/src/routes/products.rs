//! Product search endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use clinic_catalog_core::ProductPage;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Page size used when `first` is absent or non-numeric.
const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on the upstream page size.
const MAX_PAGE_SIZE: i64 = 50;

/// Query parameters for `GET /products`.
///
/// `first` is kept as a raw string so a non-numeric value degrades to the
/// default instead of rejecting the request with a 400.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Free-text search input.
    pub query: Option<String>,
    /// Requested page size.
    pub first: Option<String>,
    /// Opaque upstream cursor from a previous page's `endCursor`.
    pub after: Option<String>,
}

/// `GET /products?query=&first=&after=`.
///
/// Returns one filtered page of catalog items. `pageInfo` is relayed
/// verbatim from the pre-filter upstream page, so callers must treat it as
/// the only pagination signal: `count` can be smaller than `first` while
/// `hasNextPage` is still true (local filtering happens after the upstream
/// page is fetched), and a short page does not imply end of data.
pub async fn products(
    State(state): State<AppState>,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<ProductPage>> {
    let service = state
        .catalog()
        .map_err(|e| AppError::Config(e.clone()))?;

    let first = parse_first(params.first.as_deref());
    let query = params.query.as_deref().unwrap_or("");

    let page = service
        .search(query, first, params.after.as_deref())
        .await?;

    Ok(Json(page))
}

/// Parse the `first` parameter leniently: absent or non-numeric falls back
/// to the default, and the result is clamped to `[1, 50]` silently.
fn parse_first(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}
