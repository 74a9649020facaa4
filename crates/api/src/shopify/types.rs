//! Decode types for the `ProductsWithInventory` response.
//!
//! These mirror the GraphQL selection set exactly. Anything Shopify may omit
//! (featured image, inventory item, inventory level at the requested
//! location) is an `Option` here, and the missing-inventory ⇒ zero rule
//! lives in one place: [`VariantNode::available_quantity`].

use clinic_catalog_core::PageInfo;
use serde::Deserialize;

/// Quantity state name whose value counts as sellable stock.
const AVAILABLE_STATE: &str = "available";

/// Top-level `data` object of the products query.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

/// The `products` connection: one upstream page plus its cursor state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    /// Relayed verbatim to clients; shapes match, so the wire type is reused.
    pub page_info: PageInfo,
    pub nodes: Vec<ProductNode>,
}

/// One product as returned by the Admin API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: Option<FeaturedImage>,
    pub variants: VariantConnection,
}

/// Featured image selection (`featuredImage { url }`).
#[derive(Debug, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
}

/// The nested `variants(first: 50)` connection.
#[derive(Debug, Deserialize)]
pub struct VariantConnection {
    pub nodes: Vec<VariantNode>,
}

/// One product variant with its inventory at the requested location.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub inventory_item: Option<InventoryItem>,
}

/// `inventoryItem { inventoryLevel(locationId:) { ... } }`.
///
/// `inventory_level` is null when the item is not stocked at the requested
/// location at all.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub inventory_level: Option<InventoryLevel>,
}

/// Inventory level at one location.
#[derive(Debug, Deserialize)]
pub struct InventoryLevel {
    #[serde(default)]
    pub quantities: Vec<QuantityEntry>,
}

/// One named quantity state (`available`, `committed`, ...).
#[derive(Debug, Deserialize)]
pub struct QuantityEntry {
    pub name: String,
    pub quantity: i64,
}

impl VariantNode {
    /// Units available at the queried location.
    ///
    /// A missing inventory item, a missing level at the location, or a
    /// quantities list without an `available` entry all count as zero.
    #[must_use]
    pub fn available_quantity(&self) -> i64 {
        self.inventory_item
            .as_ref()
            .and_then(|item| item.inventory_level.as_ref())
            .map_or(0, |level| {
                level
                    .quantities
                    .iter()
                    .find(|q| q.name == AVAILABLE_STATE)
                    .map_or(0, |q| q.quantity)
            })
    }
}
