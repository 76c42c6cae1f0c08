//! Plain-text rendering of products, cart, wishlist and settings.

use std::io::{self, Write};

use redcart_core::{CheckoutSummary, Product, Setting, Settings, ShippingMethod, StarRating, format_usd};
use redcart_storefront::catalog::CatalogPage;
use redcart_storefront::store::{CartState, Stores, WishlistState};

/// `★★★★½` style rendering of a star rating.
#[must_use]
pub fn stars(rating: StarRating) -> String {
    let mut s = "★".repeat(usize::from(rating.full));
    if rating.half {
        s.push('½');
    }
    s.push_str(&"☆".repeat(usize::from(rating.empty)));
    s
}

/// One product line: id, title, price (with the pre-discount price when on
/// offer), rating and cart/wishlist markers.
pub fn product_line(out: &mut impl Write, product: &Product, stores: &Stores) -> io::Result<()> {
    let price = match product.original_price() {
        Some(original) => format!("{} (was {})", format_usd(product.price), format_usd(original)),
        None => format_usd(product.price),
    };
    let in_cart = stores.cart.state().quantity_of(product.id);
    let mut markers = String::new();
    if in_cart > 0 {
        markers.push_str(&format!(" [cart x{in_cart}]"));
    }
    if stores.wishlist.state().contains(product.id) {
        markers.push_str(" [♥]");
    }

    writeln!(
        out,
        "{:>4}  {:<40}  {:>22}  {}{}",
        product.id.as_u32(),
        product.title,
        price,
        stars(product.stars()),
        markers
    )
}

/// A page of results with its pager line.
pub fn catalog_page(out: &mut impl Write, page: &CatalogPage, stores: &Stores) -> io::Result<()> {
    if page.items.is_empty() {
        writeln!(out, "No products found.")?;
    }
    for product in &page.items {
        product_line(out, product, stores)?;
    }
    writeln!(
        out,
        "Page {} of {} ({} products)",
        page.page,
        page.total_pages.max(1),
        page.total_count
    )
}

/// Cart lines followed by the checkout summary.
pub fn cart(out: &mut impl Write, cart: &CartState, method: ShippingMethod) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for line in cart.items() {
        writeln!(
            out,
            "{:>4}  {:<40}  {:>3} x {:>9} = {:>10}",
            line.product_id.as_u32(),
            line.title,
            line.quantity,
            format_usd(line.price),
            format_usd(line.line_total())
        )?;
    }

    let summary = CheckoutSummary::new(cart.subtotal(), method);
    writeln!(out, "{} item(s)", cart.item_count())?;
    writeln!(out, "Subtotal: {}", summary.subtotal_display())?;
    writeln!(out, "Shipping: {} ({})", summary.shipping_display(), method.label())?;
    writeln!(out, "Total:    {}", summary.total_display())
}

pub fn wishlist(out: &mut impl Write, wishlist: &WishlistState, stores: &Stores) -> io::Result<()> {
    if wishlist.is_empty() {
        return writeln!(out, "Your wishlist is empty.");
    }
    for product in wishlist.items() {
        product_line(out, product, stores)?;
    }
    writeln!(out, "{} saved product(s)", wishlist.count())
}

pub fn settings(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    for setting in Setting::ALL {
        let state = if settings.get(setting) { "on" } else { "off" };
        writeln!(out, "{:<24} {state}", setting.as_str())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use redcart_storefront::store::CartAction;

    use super::*;
    use crate::commands::test_support::{context, output, product};

    #[test]
    fn test_stars() {
        assert_eq!(stars(StarRating::from_rating(3.5)), "★★★½☆");
        assert_eq!(stars(StarRating::from_rating(5.0)), "★★★★★");
    }

    #[test]
    fn test_cart_rendering() {
        let mut ctx = context();
        ctx.stores.cart.dispatch(CartAction::add(product(1, "Perfume", 10.0)));
        ctx.stores.cart.dispatch(CartAction::add(product(1, "Perfume", 10.0)));

        let mut buf = Vec::new();
        cart(&mut buf, ctx.stores.cart.state(), ShippingMethod::Delivery).unwrap();
        let text = output(buf);
        assert!(text.contains("Subtotal: $20.00"));
        assert!(text.contains("Shipping: $9.90"));
        assert!(text.contains("Total:    $29.90"));

        let mut buf = Vec::new();
        cart(&mut buf, ctx.stores.cart.state(), ShippingMethod::Pickup).unwrap();
        assert!(output(buf).contains("Shipping: Free"));
    }

    #[test]
    fn test_product_line_markers() {
        let mut ctx = context();
        let mut discounted = product(2, "Watch", 75.0);
        discounted.discount_percentage = Some(25.0);
        ctx.stores.cart.dispatch(CartAction::add(discounted.clone()));

        let mut buf = Vec::new();
        product_line(&mut buf, &discounted, &ctx.stores).unwrap();
        let text = output(buf);
        assert!(text.contains("$75.00 (was $100.00)"));
        assert!(text.contains("[cart x1]"));
        assert!(!text.contains('♥'));
    }

    #[test]
    fn test_settings_rendering() {
        let mut buf = Vec::new();
        settings(&mut buf, &Settings::default()).unwrap();
        let text = output(buf);
        assert!(text.contains("dark_mode"));
        assert!(text.lines().any(|l| l.starts_with("order_updates") && l.ends_with("on")));
    }
}
