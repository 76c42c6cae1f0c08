//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use redcart_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::{WishlistAction, WishlistState};

/// Wishlist display data.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistView {
    pub items: Vec<Product>,
    pub count: usize,
}

impl From<&WishlistState> for WishlistView {
    fn from(wishlist: &WishlistState) -> Self {
        Self {
            items: wishlist.items().to_vec(),
            count: wishlist.count(),
        }
    }
}

/// Toggle request body.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub product_id: ProductId,
}

/// Result of a toggle: the new list and whether the product is now saved.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub saved: bool,
    #[serde(flatten)]
    pub wishlist: WishlistView,
}

fn apply(state: &AppState, action: WishlistAction) -> Result<Json<WishlistView>> {
    let mut stores = state.stores()?;
    stores.wishlist.dispatch(action);
    Ok(Json(WishlistView::from(stores.wishlist.state())))
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<WishlistView>> {
    let stores = state.stores()?;
    Ok(Json(WishlistView::from(stores.wishlist.state())))
}

/// Save a product, or unsave it if already saved.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>> {
    let product = state.catalog().get_product(request.product_id).await?;

    let mut stores = state.stores()?;
    stores.wishlist.dispatch(WishlistAction::toggle(product));
    let wishlist = stores.wishlist.state();
    Ok(Json(ToggleResponse {
        saved: wishlist.contains(request.product_id),
        wishlist: WishlistView::from(wishlist),
    }))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<WishlistView>> {
    apply(&state, WishlistAction::Remove(product_id))
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<WishlistView>> {
    apply(&state, WishlistAction::Clear)
}
