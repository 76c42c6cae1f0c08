//! Catalog API client implementation.
//!
//! Uses `reqwest` 0.13 for HTTP and caches products, product lists and
//! comments using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use redcart_core::{Comment, Product, ProductId};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use super::types::{CommentsResponse, ProductsResponse};
use crate::catalog::{pick_similar, similar_window};
use crate::config::CatalogConfig;

/// Number of comments shown as reviews on a product page.
pub const REVIEW_COUNT: usize = 3;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the DummyJSON catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    product_limit: u32,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("product_limit", &self.inner.product_limit)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                product_limit: config.product_limit,
                cache,
            }),
        }
    }

    /// How many products make up the browsable catalog.
    #[must_use]
    pub fn product_limit(&self) -> u32 {
        self.inner.product_limit
    }

    /// Build `<base>/<segments...>`, keeping any path prefix on the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first `limit` products, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Products { limit };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for products");
            return Ok(products.to_vec());
        }

        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let response: ProductsResponse = self.fetch(url).await?;
        debug!(count = response.products.len(), "Fetched products");

        self.inner
            .cache
            .insert(key, CacheValue::Products(response.products.clone().into()))
            .await;

        Ok(response.products)
    }

    /// Get the browsable catalog (the configured product limit).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_products(self.inner.product_limit).await
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the API answers 404, or another
    /// error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok((*product).clone());
        }

        let url = self.endpoint(&["products", &id.to_string()]);
        let product: Product = match self.fetch(url).await {
            Ok(product) => product,
            Err(CatalogError::Status { status: 404, .. }) => {
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(key, CacheValue::Product(Arc::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get up to eight random neighbours of `id`, drawn from the first
    /// [`similar_window(id)`](similar_window) catalog products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_similar(&self, id: ProductId) -> Result<Vec<Product>, CatalogError> {
        let candidates = self.get_products(similar_window(id)).await?;
        Ok(pick_similar(candidates, id, &mut rand::rng()))
    }

    // =========================================================================
    // Comment Methods
    // =========================================================================

    /// Get all comments from the first page of the comments endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_comments(&self) -> Result<Vec<Comment>, CatalogError> {
        let key = CacheKey::Comments;

        if let Some(CacheValue::Comments(comments)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for comments");
            return Ok(comments.to_vec());
        }

        let response: CommentsResponse = self.fetch(self.endpoint(&["comments"])).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Comments(response.comments.clone().into()))
            .await;

        Ok(response.comments)
    }

    /// The comments shown as reviews: the first [`REVIEW_COUNT`] of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_reviews(&self) -> Result<Vec<Comment>, CatalogError> {
        let mut comments = self.get_comments().await?;
        comments.truncate(REVIEW_COUNT);
        Ok(comments)
    }

    /// Drop every cached response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}
