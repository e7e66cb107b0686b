//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::MerchConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration and
/// the backend gateway client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MerchConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create a new application state from the loaded configuration.
    #[must_use]
    pub fn new(config: MerchConfig) -> Self {
        let backend = BackendClient::new(&config.backend_base_url);

        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &MerchConfig {
        &self.inner.config
    }

    /// Get a reference to the backend gateway client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }
}
