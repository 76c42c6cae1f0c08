//! Cart slice.
//!
//! The cart is an ordered list of line items with at most one line per
//! product. Persisted under `cartItems` as a flat JSON array.

use redcart_core::{CartLineItem, Product, ProductId};
use serde::{Deserialize, Serialize};

use super::{Outcome, Slice};

/// Cart contents, in the order products were first added.
///
/// Decoding goes through [`CartState::from_lines`], so stored data that
/// repeats a product or carries a zero quantity is repaired on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items (not summed quantities).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Σ(price × quantity), unrounded.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Quantity of `product_id` in the cart, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.product_id == product_id)
    }
}

impl CartState {
    /// Build a cart from raw lines: lines repeating a product are merged
    /// into the first one (quantities summed), zero-quantity lines dropped.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLineItem>) -> Self {
        let mut items: Vec<CartLineItem> = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity == 0 {
                tracing::warn!(product_id = %line.product_id, "Dropping cart line with zero quantity");
                continue;
            }
            match items.iter_mut().find(|item| item.product_id == line.product_id) {
                Some(existing) => {
                    tracing::warn!(product_id = %line.product_id, "Merging duplicate cart line");
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => items.push(line),
            }
        }
        Self { items }
    }
}

impl From<Vec<CartLineItem>> for CartState {
    fn from(lines: Vec<CartLineItem>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<CartState> for Vec<CartLineItem> {
    fn from(cart: CartState) -> Self {
        cart.items
    }
}

impl FromIterator<CartLineItem> for CartState {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Cart mutations.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one of `product`; repeats increment the existing line.
    Add(Box<Product>),
    /// Drop the line for a product, if any.
    Remove(ProductId),
    /// Set a line's quantity. Values below 1 are rejected.
    UpdateQuantity {
        product_id: ProductId,
        quantity: i64,
    },
    /// Empty the cart and forget the persisted copy.
    Clear,
}

impl CartAction {
    #[must_use]
    pub fn add(product: Product) -> Self {
        Self::Add(Box::new(product))
    }
}

/// Marker type for the cart [`Slice`].
#[derive(Debug)]
pub struct CartSlice;

impl Slice for CartSlice {
    type State = CartState;
    type Action = CartAction;

    const NAME: &'static str = "cart";
    const STORAGE_KEY: &'static str = "cartItems";

    fn reduce(state: &CartState, action: CartAction) -> Outcome<CartState> {
        match action {
            CartAction::Add(product) => {
                let mut next = state.clone();
                match next.items.iter_mut().find(|line| line.product_id == product.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => next.items.push(CartLineItem::new(&product)),
                }
                Outcome::Changed(next)
            }
            CartAction::Remove(product_id) => {
                if !state.contains(product_id) {
                    return Outcome::Unchanged;
                }
                Outcome::Changed(
                    state
                        .items
                        .iter()
                        .filter(|line| line.product_id != product_id)
                        .cloned()
                        .collect(),
                )
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => {
                let quantity = match u32::try_from(quantity) {
                    Ok(q) if q >= 1 => q,
                    _ => {
                        tracing::debug!(%product_id, quantity, "Rejected quantity update");
                        return Outcome::Unchanged;
                    }
                };
                match state.line(product_id) {
                    Some(line) if line.quantity != quantity => {
                        let mut next = state.clone();
                        for line in &mut next.items {
                            if line.product_id == product_id {
                                line.quantity = quantity;
                            }
                        }
                        Outcome::Changed(next)
                    }
                    _ => Outcome::Unchanged,
                }
            }
            CartAction::Clear => Outcome::Cleared,
        }
    }
}
