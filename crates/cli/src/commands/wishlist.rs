//! Wishlist commands.

use std::io::Write;

use redcart_core::ProductId;
use redcart_storefront::store::WishlistAction;

use super::render;
use super::{CliError, Context};

/// # Errors
///
/// Returns an error if output fails.
pub fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    render::wishlist(out, ctx.stores.wishlist.state(), &ctx.stores)?;
    Ok(())
}

/// Fetch a product and flip its wishlist membership.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched or output fails.
pub async fn toggle(ctx: &mut Context, id: ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let product = ctx.catalog.get_product(id).await?;
    let title = product.title.clone();
    ctx.stores.wishlist.dispatch(WishlistAction::toggle(product));
    if ctx.stores.wishlist.state().contains(id) {
        writeln!(out, "Saved {title} to your wishlist")?;
    } else {
        writeln!(out, "Removed {title} from your wishlist")?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if output fails.
pub fn remove(ctx: &mut Context, id: ProductId, out: &mut impl Write) -> Result<(), CliError> {
    if ctx.stores.wishlist.dispatch(WishlistAction::Remove(id)) {
        writeln!(out, "Removed product {id} from your wishlist")?;
    } else {
        writeln!(out, "Product {id} is not in your wishlist")?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if output fails.
pub fn clear(ctx: &mut Context, out: &mut impl Write) -> Result<(), CliError> {
    ctx.stores.wishlist.dispatch(WishlistAction::Clear);
    writeln!(out, "Wishlist cleared")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, output, product};

    #[test]
    fn test_remove_and_show() {
        let mut ctx = context();
        ctx.stores.wishlist.dispatch(WishlistAction::toggle(product(4, "Bag", 60.0)));

        let mut buf = Vec::new();
        show(&ctx, &mut buf).unwrap();
        remove(&mut ctx, ProductId::new(4), &mut buf).unwrap();
        remove(&mut ctx, ProductId::new(4), &mut buf).unwrap();
        show(&ctx, &mut buf).unwrap();

        let text = output(buf);
        assert!(text.contains("Bag"));
        assert!(text.contains("1 saved product(s)"));
        assert!(text.contains("Removed product 4 from your wishlist"));
        assert!(text.contains("Product 4 is not in your wishlist"));
        assert!(text.trim_end().ends_with("Your wishlist is empty."));
    }
}
