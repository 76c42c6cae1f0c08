//! Product route handlers.
//!
//! Listing runs the catalog query pipeline over the configured product
//! window; detail, reviews and similar products are fetched per request.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use redcart_core::{Comment, Product, ProductId, StarRating, format_usd};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{self, CatalogQuery, DEFAULT_MAX_PRICE, SortKey};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::Stores;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub product: Product,
    pub price_display: String,
    /// Struck-through pre-discount price, when discounted.
    pub original_price_display: Option<String>,
    pub stars: StarRating,
    pub in_cart: bool,
    pub cart_quantity: u32,
    pub in_wishlist: bool,
}

impl ProductView {
    /// Build the view of `product` as seen from the current stores.
    #[must_use]
    pub fn new(product: Product, stores: &Stores) -> Self {
        let cart_quantity = stores.cart.state().quantity_of(product.id);
        Self {
            price_display: format_usd(product.price),
            original_price_display: product.original_price().map(format_usd),
            stars: product.stars(),
            in_cart: cart_quantity > 0,
            cart_quantity,
            in_wishlist: stores.wishlist.state().contains(product.id),
            product,
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    /// Comma-separated category names.
    pub categories: Option<String>,
    pub max_price: Option<f64>,
    pub offers: Option<bool>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ListQuery {
    /// Convert to a pipeline query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown sort key or a
    /// non-finite `max_price`.
    pub fn to_catalog_query(&self) -> Result<CatalogQuery> {
        let max_price = self.max_price.unwrap_or(DEFAULT_MAX_PRICE);
        if !max_price.is_finite() {
            return Err(AppError::BadRequest(format!("invalid max_price: {max_price}")));
        }
        let sort_key = match self.sort.as_deref() {
            Some(sort) => sort.parse::<SortKey>().map_err(AppError::BadRequest)?,
            None => SortKey::None,
        };

        Ok(CatalogQuery {
            search_text: self.q.clone().unwrap_or_default(),
            selected_categories: self
                .categories
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect(),
            max_price,
            offers_only: self.offers.unwrap_or(false),
            sort_key,
            page: self.page.unwrap_or(1),
        })
    }
}

/// One page of the product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub items: Vec<ProductView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A comment presented as a review.
#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub id: u32,
    pub body: String,
    pub username: String,
    pub full_name: String,
    pub likes: u32,
    pub rating: u8,
}

impl From<Comment> for ReviewView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.as_u32(),
            rating: comment.sample_rating(),
            body: comment.body,
            username: comment.user.username,
            full_name: comment.user.full_name,
            likes: comment.likes,
        }
    }
}

/// Rating summary and reviews for one product.
#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub product_id: ProductId,
    pub rating: f64,
    pub stars: StarRating,
    pub reviews: Vec<ReviewView>,
}

/// List products: search, filter, sort and paginate the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let query = params.to_catalog_query()?;
    let products = state.catalog().get_catalog().await?;
    let page = catalog::query(&products, &query);

    let stores = state.stores()?;
    Ok(Json(ProductListResponse {
        has_next: page.has_next(),
        has_prev: page.has_prev(),
        page: page.page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        items: page
            .items
            .into_iter()
            .map(|product| ProductView::new(product, &stores))
            .collect(),
    }))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let product = state.catalog().get_product(id).await?;
    let stores = state.stores()?;
    Ok(Json(ProductView::new(product, &stores)))
}

/// Rating and the first reviews for a product.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ReviewsResponse>> {
    let (product, comments) =
        tokio::try_join!(state.catalog().get_product(id), state.catalog().get_reviews())?;

    Ok(Json(ReviewsResponse {
        product_id: product.id,
        rating: product.rating,
        stars: product.stars(),
        reviews: comments.into_iter().map(ReviewView::from).collect(),
    }))
}

/// Random neighbours of a product.
#[instrument(skip(state))]
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ProductView>>> {
    let products = state.catalog().get_similar(id).await?;
    let stores = state.stores()?;
    Ok(Json(
        products
            .into_iter()
            .map(|product| ProductView::new(product, &stores))
            .collect(),
    ))
}
