//! Product search/filter/annotate pipeline.
//!
//! Two halves that must stay in sync:
//!
//! 1. [`build_search_query`] translates free text into Shopify's search
//!    syntax (prefix matching per field, no quoting, sanitized terms).
//! 2. [`project_products`] re-filters the returned page with the
//!    *un-sanitized* normalized terms, because Shopify's prefix-only
//!    matching misses mid-word and accent-variant hits, then applies the
//!    business rules the upstream query cannot express (vendor blocklist,
//!    stock projection, top-tag annotation).

use clinic_catalog_core::text::normalize;
use clinic_catalog_core::{CatalogItem, ProductPage, VariantSummary};
use tracing::instrument;

use crate::config::ShopifyConfig;
use crate::shopify::types::ProductNode;
use crate::shopify::{ShopifyClient, ShopifyError};

/// Vendor excluded from the catalog unconditionally (point-of-sale display
/// material that leaked into the product catalog).
const BLOCKED_VENDOR: &str = "plv";

/// Split free text into normalized search terms.
///
/// These are the terms the secondary filter matches against; unlike the
/// query builder they keep every character the normalizer leaves behind.
#[must_use]
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Keep only characters Shopify's search syntax accepts unquoted.
fn sanitize_term(term: &str) -> String {
    term.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Build the Shopify search expression for a free-text query.
///
/// Each term becomes a disjunction of title/vendor/tag prefix matches; all
/// term clauses plus the `status:active` filter are AND-joined. Empty or
/// whitespace-only input yields exactly `status:active`.
#[must_use]
pub fn build_search_query(query: &str) -> String {
    let mut parts: Vec<String> = query
        .split_whitespace()
        .map(|term| sanitize_term(&normalize(term)))
        .filter(|term| !term.is_empty())
        .map(|term| format!("(title:{term}* OR vendor:{term}* OR tag:{term}*)"))
        .collect();

    if parts.is_empty() {
        return "status:active".to_string();
    }

    parts.push("status:active".to_string());
    parts.join(" AND ")
}

/// Whether every term appears somewhere in the normalized text.
fn matches_all_terms(text: &str, terms: &[String]) -> bool {
    let normalized = normalize(text);
    terms.iter().all(|term| normalized.contains(term.as_str()))
}

/// Whether any tag contains any of the terms.
fn any_tag_matches(tags: &[String], terms: &[String]) -> bool {
    tags.iter().any(|tag| {
        let normalized = normalize(tag);
        terms.iter().any(|term| normalized.contains(term.as_str()))
    })
}

/// Filter, annotate, and project one upstream page of products.
///
/// Order is preserved both across products and within a product's variants.
/// A product survives when it passes the vendor blocklist, matches the
/// search terms (title OR vendor OR tags), and has at least one variant
/// with stock at the clinic location.
#[must_use]
pub fn project_products(nodes: Vec<ProductNode>, terms: &[String], top_tag: &str) -> Vec<CatalogItem> {
    let top_tag = normalize(top_tag);
    let mut items = Vec::new();

    for product in nodes {
        if normalize(&product.vendor) == BLOCKED_VENDOR {
            continue;
        }

        if !terms.is_empty() {
            let matched = matches_all_terms(&product.title, terms)
                || matches_all_terms(&product.vendor, terms)
                || any_tag_matches(&product.tags, terms);
            if !matched {
                continue;
            }
        }

        let is_top_tagged = product.tags.iter().any(|tag| normalize(tag) == top_tag);

        let variants: Vec<VariantSummary> = product
            .variants
            .nodes
            .into_iter()
            .filter_map(|variant| {
                let available_qty = variant.available_quantity();
                (available_qty > 0).then_some(VariantSummary {
                    id: variant.id,
                    title: variant.title,
                    sku: variant.sku,
                    available_qty,
                })
            })
            .collect();

        if variants.is_empty() {
            continue;
        }

        items.push(CatalogItem {
            id: product.id,
            title: product.title,
            handle: product.handle,
            vendor: product.vendor,
            is_top_tagged,
            image_url: product.featured_image.map(|img| img.url),
            variants,
        });
    }

    items
}

/// The catalog query service: provider query building, the upstream call,
/// and response re-shaping, in one request-scoped pass.
#[derive(Clone)]
pub struct CatalogService {
    shopify: ShopifyClient,
    top_tag: String,
}

impl CatalogService {
    /// Create the service from the Shopify configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self::from_parts(ShopifyClient::new(config), config.top_tag.clone())
    }

    /// Create the service from an existing client (used with mock endpoints).
    #[must_use]
    pub fn from_parts(shopify: ShopifyClient, top_tag: String) -> Self {
        Self { shopify, top_tag }
    }

    /// Run one search: build the provider query, fetch a page, re-filter and
    /// project it.
    ///
    /// `page_info` is relayed verbatim from the pre-filter upstream page, so
    /// `count` may be smaller than `first` even when more data exists.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call fails, with no partial results.
    #[instrument(skip(self), fields(first = first))]
    pub async fn search(
        &self,
        query: &str,
        first: i64,
        after: Option<&str>,
    ) -> Result<ProductPage, ShopifyError> {
        let provider_query = build_search_query(query);
        let data = self
            .shopify
            .products_with_inventory(&provider_query, first, after)
            .await?;

        let terms = search_terms(query);
        let items = project_products(data.products.nodes, &terms, &self.top_tag);

        Ok(ProductPage {
            page_info: data.products.page_info,
            count: items.len(),
            items,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(json: serde_json::Value) -> ProductNode {
        serde_json::from_value(json).unwrap()
    }

    fn stocked_product(id: u64, title: &str, vendor: &str, tags: &[&str]) -> ProductNode {
        product(serde_json::json!({
            "id": format!("gid://shopify/Product/{id}"),
            "title": title,
            "handle": title.to_lowercase().replace(' ', "-"),
            "vendor": vendor,
            "tags": tags,
            "featuredImage": { "url": "https://cdn.example/p.jpg" },
            "variants": { "nodes": [{
                "id": format!("gid://shopify/ProductVariant/{id}0"),
                "title": "Default",
                "sku": "SKU-1",
                "availableForSale": true,
                "inventoryItem": { "inventoryLevel": { "quantities": [
                    { "name": "available", "quantity": 3 }
                ]}}
            }]}
        }))
    }

    // ------------------------------------------------------------------
    // Query builder
    // ------------------------------------------------------------------

    #[test]
    fn test_build_empty_query_is_status_filter() {
        assert_eq!(build_search_query(""), "status:active");
        assert_eq!(build_search_query("   "), "status:active");
    }

    #[test]
    fn test_build_multi_term_query() {
        let q = build_search_query("Café Rojo");
        assert_eq!(
            q,
            "(title:cafe* OR vendor:cafe* OR tag:cafe*) AND \
             (title:rojo* OR vendor:rojo* OR tag:rojo*) AND status:active"
        );
    }

    #[test]
    fn test_build_strips_filter_syntax() {
        // Characters outside [a-z0-9] would break or inject Shopify syntax.
        let q = build_search_query("l'oréal status:draft");
        assert_eq!(
            q,
            "(title:loreal* OR vendor:loreal* OR tag:loreal*) AND \
             (title:statusdraft* OR vendor:statusdraft* OR tag:statusdraft*) AND status:active"
        );
    }

    #[test]
    fn test_build_drops_terms_that_sanitize_to_nothing() {
        assert_eq!(build_search_query("!!! ???"), "status:active");
        let q = build_search_query("serum !!!");
        assert_eq!(q, "(title:serum* OR vendor:serum* OR tag:serum*) AND status:active");
    }

    #[test]
    fn test_search_terms_are_normalized_not_sanitized() {
        assert_eq!(search_terms("Café B5"), vec!["cafe", "b5"]);
        // Punctuation survives here, unlike in the provider query.
        assert_eq!(search_terms("l'oréal"), vec!["l'oreal"]);
        assert!(search_terms("   ").is_empty());
    }

    // ------------------------------------------------------------------
    // Filter & projector
    // ------------------------------------------------------------------

    #[test]
    fn test_blocked_vendor_always_excluded() {
        let nodes = vec![
            stocked_product(1, "Display Stand", "PLV", &[]),
            stocked_product(2, "Serum", "Acme", &[]),
        ];
        let items = project_products(nodes, &[], "topdoctores");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].vendor, "Acme");

        // Accent/case variants of the vendor name are also blocked.
        let nodes = vec![stocked_product(3, "Poster", "Plv", &[])];
        assert!(project_products(nodes, &search_terms("poster"), "topdoctores").is_empty());
    }

    #[test]
    fn test_zero_stock_product_dropped_entirely() {
        let zero_stock = product(serde_json::json!({
            "id": "gid://shopify/Product/9",
            "title": "Agotado",
            "handle": "agotado",
            "vendor": "Acme",
            "tags": [],
            "featuredImage": null,
            "variants": { "nodes": [{
                "id": "gid://shopify/ProductVariant/90",
                "title": "Default",
                "sku": null,
                "availableForSale": true,
                "inventoryItem": { "inventoryLevel": { "quantities": [
                    { "name": "available", "quantity": 0 }
                ]}}
            }]}
        }));
        assert!(project_products(vec![zero_stock], &[], "topdoctores").is_empty());
    }

    #[test]
    fn test_out_of_stock_variant_projected_away() {
        let mixed = product(serde_json::json!({
            "id": "gid://shopify/Product/10",
            "title": "Crema",
            "handle": "crema",
            "vendor": "Acme",
            "tags": [],
            "featuredImage": null,
            "variants": { "nodes": [
                {
                    "id": "gid://shopify/ProductVariant/101",
                    "title": "30ml",
                    "sku": "C-30",
                    "availableForSale": true,
                    "inventoryItem": { "inventoryLevel": { "quantities": [
                        { "name": "available", "quantity": 0 }
                    ]}}
                },
                {
                    "id": "gid://shopify/ProductVariant/102",
                    "title": "50ml",
                    "sku": "C-50",
                    "availableForSale": true,
                    "inventoryItem": { "inventoryLevel": { "quantities": [
                        { "name": "available", "quantity": 5 }
                    ]}}
                }
            ]}
        }));
        let items = project_products(vec![mixed], &[], "topdoctores");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variants.len(), 1);
        assert_eq!(items[0].variants[0].title, "50ml");
        assert_eq!(items[0].variants[0].available_qty, 5);
    }

    #[test]
    fn test_tag_only_match_is_included() {
        // Matches neither title nor vendor, only a tag: OR across fields.
        let nodes = vec![stocked_product(4, "Crema Manos", "Acme", &["azul", "hidratante"])];
        let items = project_products(nodes, &search_terms("azul"), "topdoctores");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_secondary_filter_is_accent_insensitive_and_partial() {
        let nodes = vec![stocked_product(5, "Sérum Facial", "Acme", &[])];
        // "seru" is a mid-word-compatible partial; upstream prefix search
        // could have missed an accent variant, the re-filter must not.
        let items = project_products(nodes, &search_terms("seru"), "topdoctores");
        assert_eq!(items.len(), 1);

        let nodes = vec![stocked_product(6, "Sérum Facial", "Acme", &[])];
        assert!(project_products(nodes, &search_terms("contorno"), "topdoctores").is_empty());
    }

    #[test]
    fn test_all_terms_must_match_for_title() {
        let nodes = vec![stocked_product(7, "Serum Facial", "Acme", &[])];
        let items = project_products(nodes, &search_terms("serum facial"), "topdoctores");
        assert_eq!(items.len(), 1);

        let nodes = vec![stocked_product(8, "Serum Facial", "Acme", &[])];
        assert!(project_products(nodes, &search_terms("serum corporal"), "topdoctores").is_empty());
    }

    #[test]
    fn test_top_tag_annotation_is_accent_insensitive() {
        let nodes = vec![
            stocked_product(11, "Serum A", "Acme", &["TopDoctóres"]),
            stocked_product(12, "Serum B", "Acme", &["novedad"]),
        ];
        let items = project_products(nodes, &[], "topdoctores");
        assert_eq!(items.len(), 2);
        assert!(items[0].is_top_tagged);
        assert!(!items[1].is_top_tagged);
    }

    #[test]
    fn test_upstream_order_preserved() {
        let nodes = vec![
            stocked_product(21, "Zeta", "Acme", &[]),
            stocked_product(22, "Alfa", "Acme", &[]),
            stocked_product(23, "Media", "Acme", &[]),
        ];
        let items = project_products(nodes, &[], "topdoctores");
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alfa", "Media"]);
    }

    #[test]
    fn test_image_url_projection() {
        let without_image = product(serde_json::json!({
            "id": "gid://shopify/Product/30",
            "title": "Sin Foto",
            "handle": "sin-foto",
            "vendor": "Acme",
            "tags": [],
            "featuredImage": null,
            "variants": { "nodes": [{
                "id": "gid://shopify/ProductVariant/301",
                "title": "Default",
                "sku": null,
                "availableForSale": true,
                "inventoryItem": { "inventoryLevel": { "quantities": [
                    { "name": "available", "quantity": 1 }
                ]}}
            }]}
        }));
        let items = project_products(vec![without_image], &[], "topdoctores");
        assert_eq!(items[0].image_url, None);
    }
}
