//! DummyJSON catalog API client.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth for products and comments; the
//!   storefront never writes to it
//! - In-memory caching via `moka` for API responses (5 minute TTL by default)
//! - No automatic retries: failures surface as [`CatalogError`] and the
//!   caller decides whether to try again
//!
//! # Endpoints
//!
//! - `GET /products?limit=N` - first N products
//! - `GET /products/{id}` - one product (404 when unknown)
//! - `GET /comments` - comments, shown as product reviews
//!
//! # Example
//!
//! ```rust,ignore
//! use redcart_storefront::dummyjson::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let products = client.get_products(30).await?;
//! let product = client.get_product(ProductId::new(1)).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::{CatalogClient, REVIEW_COUNT};
pub use types::{CommentsResponse, ProductsResponse};

use redcart_core::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Whether trying the same request again might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}
