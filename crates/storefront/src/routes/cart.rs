//! Cart route handlers.
//!
//! Every mutation answers with the full cart view, so a rejected change
//! (for instance a quantity below one) shows up as an unchanged cart rather
//! than an error.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use redcart_core::{CartLineItem, CheckoutSummary, ProductId, ShippingMethod, format_usd, round_cents};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::store::{CartAction, CartState};

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub line: CartLineItem,
    pub price_display: String,
    pub line_total_display: String,
}

impl From<&CartLineItem> for CartLineView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            price_display: format_usd(line.price),
            line_total_display: format_usd(line.line_total()),
            line: line.clone(),
        }
    }
}

/// Checkout totals for the chosen shipping method.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub method: ShippingMethod,
    pub method_label: &'static str,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub subtotal_display: String,
    pub shipping_display: String,
    pub total_display: String,
}

impl From<CheckoutSummary> for CheckoutView {
    fn from(summary: CheckoutSummary) -> Self {
        Self {
            method: summary.method,
            method_label: summary.method.label(),
            subtotal: round_cents(summary.subtotal),
            shipping: round_cents(summary.shipping),
            total: round_cents(summary.total),
            subtotal_display: summary.subtotal_display(),
            shipping_display: summary.shipping_display(),
            total_display: summary.total_display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Distinct line items.
    pub item_count: usize,
    pub total_quantity: u64,
    pub checkout: CheckoutView,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &CartState, method: ShippingMethod) -> Self {
        Self {
            items: cart.items().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            checkout: CheckoutSummary::new(cart.subtotal(), method).into(),
        }
    }
}

/// `GET /cart` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ShowQuery {
    pub shipping: Option<String>,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: ProductId,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub quantity: i64,
}

/// Dispatch `action` to the cart and render it with pickup shipping.
fn apply(state: &AppState, action: CartAction) -> Result<Json<CartView>> {
    let mut stores = state.stores()?;
    stores.cart.dispatch(action);
    Ok(Json(CartView::new(stores.cart.state(), ShippingMethod::default())))
}

/// Show the cart with checkout totals.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ShowQuery>,
) -> Result<Json<CartView>> {
    let method = match query.shipping.as_deref() {
        Some(raw) => raw.parse::<ShippingMethod>().map_err(AppError::BadRequest)?,
        None => ShippingMethod::default(),
    };
    let stores = state.stores()?;
    Ok(Json(CartView::new(stores.cart.state(), method)))
}

/// Add one of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartView>> {
    let product = state.catalog().get_product(request.product_id).await?;

    let product_id = request.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    apply(&state, CartAction::add(product))
}

/// Set a line's quantity. Quantities below one leave the cart unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<CartView>> {
    apply(
        &state,
        CartAction::UpdateQuantity {
            product_id,
            quantity: request.quantity,
        },
    )
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    apply(&state, CartAction::Remove(product_id))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    apply(&state, CartAction::Clear)
}
