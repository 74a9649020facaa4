//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::config::ConfigError;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog service slot is sticky: it is
/// built once at process start, and a configuration failure is stored and
/// replayed on every `/products` request instead of crashing the process.
/// `/health` never consults it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Result<CatalogService, ConfigError>,
}

impl AppState {
    /// Create the application state from the configuration load result.
    #[must_use]
    pub fn new(catalog: Result<CatalogService, ConfigError>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog }),
        }
    }

    /// Get the catalog service, or the configuration error recorded at
    /// startup.
    pub fn catalog(&self) -> Result<&CatalogService, &ConfigError> {
        self.inner.catalog.as_ref()
    }
}
