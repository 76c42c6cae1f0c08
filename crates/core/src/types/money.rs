//! Money formatting.
//!
//! Amounts are plain `f64` dollars throughout the storefront, matching what
//! the catalog API serves. Rounding to cents happens only here, at
//! presentation time.

/// Format a dollar amount with two decimals and no thousands separator,
/// e.g. `$1234.50`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Round to whole cents for display.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
