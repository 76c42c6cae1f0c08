//! Response envelopes of the catalog API.
//!
//! Only the list field is kept; paging metadata (`total`, `skip`, `limit`)
//! is ignored.

use redcart_core::{Comment, Product};
use serde::Deserialize;

/// `GET /products` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /comments` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}
