//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use redcart_core::format_usd;

use crate::config::StorefrontConfig;
use crate::dummyjson::CatalogClient;
use crate::error::AppError;
use crate::storage::{FileStore, Persistence};
use crate::store::Stores;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, the client-state stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    // Locked only for synchronous store work, never across an `.await`.
    stores: Mutex<Stores>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("catalog", &self.inner.catalog)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state persisting to the configured data directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let persistence = Persistence::new(FileStore::new(&config.data_dir));
        Self::with_persistence(config, &persistence)
    }

    /// Create application state over an explicit persistence backend.
    #[must_use]
    pub fn with_persistence(config: StorefrontConfig, persistence: &Persistence) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let mut stores = Stores::hydrate(persistence);

        stores.cart.subscribe(|change| {
            let cart = change.state();
            tracing::debug!(
                items = cart.item_count(),
                quantity = cart.total_quantity(),
                subtotal = %format_usd(cart.subtotal()),
                "Cart changed"
            );
        });

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                stores: Mutex::new(stores),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock the stores.
    ///
    /// The guard must be dropped before the handler awaits anything.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn stores(&self) -> Result<MutexGuard<'_, Stores>, AppError> {
        self.inner
            .stores
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))
    }
}
