//! Cache types for catalog API responses.

use std::sync::Arc;

use redcart_core::{Comment, Product, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products { limit: u32 },
    Comments,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Arc<Product>),
    Products(Arc<[Product]>),
    Comments(Arc<[Comment]>),
}
