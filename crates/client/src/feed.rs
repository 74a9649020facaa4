//! Incremental fetch state for the paginated product list.

use clinic_catalog_core::CatalogItem;

use crate::auth::TokenProvider;
use crate::client::{CatalogClient, ClientError};

/// Accumulated pagination state for one search.
///
/// A new search resets the accumulated items and cursor; "load more"
/// fetches with the stored cursor and appends. Page fetches are sequential
/// by construction: the next cursor only exists once the previous page has
/// resolved.
///
/// The page `count` is not a pagination signal: a page can come back
/// shorter than the requested size while more data exists, because the
/// service filters after fetching the upstream page. Only
/// [`Self::has_more`] (the relayed `hasNextPage`) decides whether to keep
/// loading.
#[derive(Debug, Default)]
pub struct ProductFeed {
    query: String,
    page_size: u32,
    items: Vec<CatalogItem>,
    cursor: Option<String>,
    has_next: bool,
}

impl ProductFeed {
    /// Create an empty feed fetching `page_size` upstream items per page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Items accumulated so far, in display order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Whether the upstream result set has more pages.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_next
    }

    /// The search text this feed is tracking.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Start a fresh search: drop accumulated state, fetch page one.
    ///
    /// # Errors
    ///
    /// On failure the feed stays in its reset (empty) state.
    pub async fn search<P: TokenProvider>(
        &mut self,
        client: &CatalogClient<P>,
        query: &str,
    ) -> Result<&[CatalogItem], ClientError> {
        self.reset(query);
        let page = client.fetch_page(&self.query, self.page_size, None).await?;
        self.apply(page);
        Ok(&self.items)
    }

    /// Fetch the next page and append it.
    ///
    /// Returns `false` without issuing a request when the feed is already
    /// exhausted.
    ///
    /// # Errors
    ///
    /// On failure the accumulated items and cursor are left untouched, so
    /// the call can simply be retried by the user.
    pub async fn load_more<P: TokenProvider>(
        &mut self,
        client: &CatalogClient<P>,
    ) -> Result<bool, ClientError> {
        if !self.has_next {
            return Ok(false);
        }
        let cursor = self.cursor.clone();
        let page = client
            .fetch_page(&self.query, self.page_size, cursor.as_deref())
            .await?;
        self.apply(page);
        Ok(true)
    }

    fn reset(&mut self, query: &str) {
        self.query = query.to_string();
        self.items.clear();
        self.cursor = None;
        self.has_next = false;
    }

    fn apply(&mut self, page: clinic_catalog_core::ProductPage) {
        self.has_next = page.page_info.has_next_page;
        self.cursor = page.page_info.end_cursor;
        self.items.extend(page.items);
    }
}
