//! Command implementations.
//!
//! Every command writes its output to a caller-supplied `Write` so the
//! rendering can be exercised without a terminal.

pub mod browse;
pub mod cart;
pub mod products;
pub mod render;
pub mod settings;
pub mod wishlist;

use std::path::Path;

use redcart_storefront::config::{CatalogConfig, ConfigError};
use redcart_storefront::dummyjson::{CatalogClient, CatalogError};
use redcart_storefront::storage::{FileStore, Persistence};
use redcart_storefront::store::Stores;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What every command works against: the catalog and the local stores.
pub struct Context {
    pub catalog: CatalogClient,
    pub stores: Stores,
}

impl Context {
    /// Load catalog settings from the environment and hydrate the stores
    /// from `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a catalog variable is invalid.
    pub fn open(data_dir: &Path) -> Result<Self, CliError> {
        let config = CatalogConfig::from_env()?;
        tracing::debug!(data_dir = %data_dir.display(), catalog = %config.base_url, "Opening stores");
        Ok(Self::new(
            &config,
            &Persistence::new(FileStore::new(data_dir)),
        ))
    }

    #[must_use]
    pub fn new(config: &CatalogConfig, persistence: &Persistence) -> Self {
        Self {
            catalog: CatalogClient::new(config),
            stores: Stores::hydrate(persistence),
        }
    }
}
