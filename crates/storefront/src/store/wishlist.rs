//! Wishlist slice: a set of product snapshots, persisted under `wishlist`.

use redcart_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

use super::{Outcome, Slice};

/// Saved products in the order they were added. Each product id appears at
/// most once; stored data repeating an id keeps only the first snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct WishlistState {
    items: Vec<Product>,
}

impl From<Vec<Product>> for WishlistState {
    fn from(products: Vec<Product>) -> Self {
        let mut items: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if items.iter().any(|item| item.id == product.id) {
                tracing::warn!(product_id = %product.id, "Dropping duplicate wishlist entry");
            } else {
                items.push(product);
            }
        }
        Self { items }
    }
}

impl From<WishlistState> for Vec<Product> {
    fn from(wishlist: WishlistState) -> Self {
        wishlist.items
    }
}

impl WishlistState {
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }
}

#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Add the product if absent, remove it if present.
    Toggle(Box<Product>),
    Remove(ProductId),
    Clear,
}

impl WishlistAction {
    #[must_use]
    pub fn toggle(product: Product) -> Self {
        Self::Toggle(Box::new(product))
    }
}

#[derive(Debug)]
pub struct WishlistSlice;

impl Slice for WishlistSlice {
    type State = WishlistState;
    type Action = WishlistAction;

    const NAME: &'static str = "wishlist";
    const STORAGE_KEY: &'static str = "wishlist";

    fn reduce(state: &WishlistState, action: WishlistAction) -> Outcome<WishlistState> {
        match action {
            WishlistAction::Toggle(product) => {
                if state.contains(product.id) {
                    Outcome::Changed(without(state, product.id))
                } else {
                    let mut next = state.clone();
                    next.items.push(*product);
                    Outcome::Changed(next)
                }
            }
            WishlistAction::Remove(product_id) if state.contains(product_id) => {
                Outcome::Changed(without(state, product_id))
            }
            WishlistAction::Remove(_) => Outcome::Unchanged,
            WishlistAction::Clear => Outcome::Cleared,
        }
    }
}

fn without(state: &WishlistState, product_id: ProductId) -> WishlistState {
    WishlistState {
        items: state
            .items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect(),
    }
}
