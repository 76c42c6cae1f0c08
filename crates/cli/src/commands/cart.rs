//! Cart commands.

use std::io::Write;

use redcart_core::{ProductId, ShippingMethod};
use redcart_storefront::store::CartAction;

use super::render;
use super::{CliError, Context};

/// Print the cart with totals for `method`.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn show(ctx: &Context, method: ShippingMethod, out: &mut impl Write) -> Result<(), CliError> {
    render::cart(out, ctx.stores.cart.state(), method)?;
    Ok(())
}

/// Fetch a product and add one of it to the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched or output fails.
pub async fn add(ctx: &mut Context, id: ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let product = ctx.catalog.get_product(id).await?;
    let title = product.title.clone();
    ctx.stores.cart.dispatch(CartAction::add(product));
    writeln!(
        out,
        "Added {title} (now {} in cart)",
        ctx.stores.cart.state().quantity_of(id)
    )?;
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn remove(ctx: &mut Context, id: ProductId, out: &mut impl Write) -> Result<(), CliError> {
    if ctx.stores.cart.dispatch(CartAction::Remove(id)) {
        writeln!(out, "Removed product {id} from the cart")?;
    } else {
        writeln!(out, "Product {id} is not in the cart")?;
    }
    Ok(())
}

/// Set a line's quantity. Values below one leave the cart unchanged.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn set_quantity(
    ctx: &mut Context,
    id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let changed = ctx.stores.cart.dispatch(CartAction::UpdateQuantity {
        product_id: id,
        quantity,
    });
    let current = ctx.stores.cart.state().quantity_of(id);
    if changed {
        writeln!(out, "Product {id} quantity set to {current}")?;
    } else if current == 0 {
        writeln!(out, "Product {id} is not in the cart")?;
    } else {
        writeln!(out, "Quantity unchanged ({current})")?;
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn clear(ctx: &mut Context, out: &mut impl Write) -> Result<(), CliError> {
    ctx.stores.cart.dispatch(CartAction::Clear);
    writeln!(out, "Cart cleared")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, output, product};

    #[test]
    fn test_set_quantity_messages() {
        let mut ctx = context();
        ctx.stores.cart.dispatch(CartAction::add(product(3, "Lamp", 20.0)));
        let id = ProductId::new(3);

        let mut buf = Vec::new();
        set_quantity(&mut ctx, id, 4, &mut buf).unwrap();
        set_quantity(&mut ctx, id, 0, &mut buf).unwrap();
        set_quantity(&mut ctx, ProductId::new(99), 2, &mut buf).unwrap();

        let text = output(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Product 3 quantity set to 4",
                "Quantity unchanged (4)",
                "Product 99 is not in the cart",
            ]
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut ctx = context();
        ctx.stores.cart.dispatch(CartAction::add(product(1, "A", 1.0)));
        ctx.stores.cart.dispatch(CartAction::add(product(2, "B", 2.0)));

        let mut buf = Vec::new();
        remove(&mut ctx, ProductId::new(1), &mut buf).unwrap();
        assert_eq!(ctx.stores.cart.state().item_count(), 1);

        clear(&mut ctx, &mut buf).unwrap();
        assert!(ctx.stores.cart.state().is_empty());
    }

    #[test]
    fn test_cart_persists_between_invocations() {
        use redcart_storefront::config::CatalogConfig;
        use redcart_storefront::storage::{FileStore, Persistence};

        let dir = tempfile::tempdir().unwrap();
        let open = || Context::new(&CatalogConfig::default(), &Persistence::new(FileStore::new(dir.path())));

        let mut first = open();
        first.stores.cart.dispatch(CartAction::add(product(5, "Kettle", 35.0)));
        let mut buf = Vec::new();
        set_quantity(&mut first, ProductId::new(5), 2, &mut buf).unwrap();
        drop(first);

        let second = open();
        assert_eq!(second.stores.cart.state().quantity_of(ProductId::new(5)), 2);
        assert!(dir.path().join("cartItems.json").exists());
    }
}
