//! Wire types for the `/products` JSON contract.
//!
//! These types are shared by the API binary (serialization) and the client
//! crate (deserialization), so the contract lives in exactly one place.
//! Field names on the wire are camelCase.

use serde::{Deserialize, Serialize};

/// One product in the catalog response.
///
/// Only variants with stock available at the clinic location appear in
/// `variants`; a product with no such variant is never emitted at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Shopify product GID (e.g. `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Vendor / brand name.
    pub vendor: String,
    /// Whether the product carries the configured "top" marker tag.
    pub is_top_tagged: bool,
    /// Featured image URL, if the product has one.
    pub image_url: Option<String>,
    /// In-stock variants, in upstream order.
    pub variants: Vec<VariantSummary>,
}

/// An in-stock variant of a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    /// Shopify variant GID.
    pub id: String,
    /// Variant title (e.g. "30ml").
    pub title: String,
    /// Stock-keeping unit, if set.
    pub sku: Option<String>,
    /// Units available at the clinic location. Always > 0 in responses.
    pub available_qty: i64,
}

/// Upstream pagination state, relayed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether the upstream result set has another page after this one.
    pub has_next_page: bool,
    /// Opaque forward-only cursor for the next page, if any.
    pub end_cursor: Option<String>,
}

/// One page of catalog results.
///
/// `count` is the number of items that survived filtering, which can be
/// smaller than the requested page size even when `page_info.has_next_page`
/// is true: filtering happens after the upstream page is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Upstream pagination state for the pre-filter node set.
    pub page_info: PageInfo,
    /// Number of surviving items in this page.
    pub count: usize,
    /// Filtered, annotated catalog items in upstream order.
    pub items: Vec<CatalogItem>,
}
