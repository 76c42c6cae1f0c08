//! Shipping-cost policy and checkout totals.
//!
//! The shipping mode is chosen per checkout and is never persisted with the
//! cart; it only feeds the displayed total.

use serde::{Deserialize, Serialize};

use super::money::format_usd;

/// Flat fee charged for home delivery.
pub const DELIVERY_FEE: f64 = 9.90;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    /// Collected in store, free.
    #[default]
    Pickup,
    /// Delivered at home for a flat fee.
    Delivery,
}

impl ShippingMethod {
    /// Shipping cost for this mode, independent of the subtotal.
    #[must_use]
    pub const fn cost(self) -> f64 {
        match self {
            Self::Pickup => 0.0,
            Self::Delivery => DELIVERY_FEE,
        }
    }

    /// Query-string / CLI value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }

    /// Human-readable description of the mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pickup => "Store pickup (in 20 min)",
            Self::Delivery => "Delivery at home (2-4 days)",
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            other => Err(format!("unknown shipping method: {other}")),
        }
    }
}

/// Subtotal, shipping and total for one checkout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub method: ShippingMethod,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

impl CheckoutSummary {
    /// Combine a cart subtotal with the chosen shipping mode.
    #[must_use]
    pub fn new(subtotal: f64, method: ShippingMethod) -> Self {
        let shipping = method.cost();
        Self {
            method,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Shipping line as displayed: `Free` when nothing is charged.
    #[must_use]
    pub fn shipping_display(&self) -> String {
        if self.shipping <= 0.0 {
            "Free".to_string()
        } else {
            format_usd(self.shipping)
        }
    }

    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_usd(self.subtotal)
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        format_usd(self.total)
    }
}
