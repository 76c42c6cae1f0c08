//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One entry in the cart: a single product and how many of it.
///
/// The display fields are a snapshot taken when the product was first added,
/// so the cart keeps rendering even if the catalog later changes or is
/// unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: f64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl CartLineItem {
    /// Start a line for `product` with a quantity of one.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            quantity: 1,
            price: product.price,
            title: product.title.clone(),
            brand: product.brand.clone(),
            thumbnail: product.thumbnail.clone(),
            discount_percentage: product.discount_percentage,
        }
    }

    /// `price * quantity`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new(3),
            title: "Powder Canister".to_string(),
            brand: Some("Velvet Touch".to_string()),
            category: "beauty".to_string(),
            price: 14.99,
            discount_percentage: Some(18.14),
            rating: 3.82,
            stock: 59,
            thumbnail: "https://cdn.example/3.png".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_new_snapshots_display_fields() {
        let line = CartLineItem::new(&product());
        assert_eq!(line.product_id, ProductId::new(3));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.title, "Powder Canister");
        assert_eq!(line.brand.as_deref(), Some("Velvet Touch"));
        assert!((line.price - 14.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_total() {
        let mut line = CartLineItem::new(&product());
        line.quantity = 3;
        assert!((line.line_total() - 44.97).abs() < 1e-9);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(CartLineItem::new(&product())).unwrap();
        assert_eq!(json["productId"], 3);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("discountPercentage").is_some());
    }
}
