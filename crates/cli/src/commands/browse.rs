//! Interactive catalog session.
//!
//! Holds a [`BrowseState`] for the whole session and re-runs the query after
//! every command. Cart changes are reported by a store subscriber rather
//! than by the command that caused them.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc;

use redcart_core::{Product, ProductId, ShippingMethod, format_usd};
use redcart_storefront::catalog::browse::FILTER_CATEGORIES;
use redcart_storefront::catalog::{self, BrowseState, SortKey};
use redcart_storefront::store::{CartAction, WishlistAction};

use super::render;
use super::{CliError, Context};

const HELP: &str = "\
Commands:
  search [text]        title search (no text clears it)
  category <name>      toggle a category filter
  max-price <amount>   price ceiling, 0-500 in steps of 25
  offers on|off        only discounted products
  sort <key>           none, price-asc, price-desc, rating-desc
  reset                clear category, price and offers filters
  next | prev          change page
  page <n>             jump to a page
  add <id>             add a product on this catalog to the cart
  wish <id>            save or unsave a product
  cart                 show the cart
  help                 this text
  quit                 leave";

/// One line of session input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Search(String),
    Category(String),
    MaxPrice(f64),
    Offers(bool),
    Sort(SortKey),
    Reset,
    Next,
    Prev,
    Page(usize),
    Add(ProductId),
    Wish(ProductId),
    Cart,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let parse_id = |s: &str| s.parse::<ProductId>().map_err(|e| e.to_string());

        match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "category" | "c" if !rest.is_empty() => Ok(Self::Category(rest.to_string())),
            "max-price" | "price" => rest
                .parse::<f64>()
                .map(Self::MaxPrice)
                .map_err(|_| format!("not a price: {rest:?}")),
            "offers" => match rest {
                "on" | "yes" | "true" => Ok(Self::Offers(true)),
                "off" | "no" | "false" => Ok(Self::Offers(false)),
                _ => Err("usage: offers on|off".to_string()),
            },
            "sort" => rest.parse::<SortKey>().map(Self::Sort),
            "reset" => Ok(Self::Reset),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" => rest
                .parse::<usize>()
                .map(Self::Page)
                .map_err(|_| format!("not a page number: {rest:?}")),
            "add" => parse_id(rest).map(Self::Add),
            "wish" => parse_id(rest).map(Self::Wish),
            "cart" => Ok(Self::Cart),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(format!("unknown command {word:?}, type `help`")),
        }
    }
}

/// Fetch the catalog once, then run the session over `input`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or I/O fails.
pub async fn run(ctx: &mut Context, input: impl BufRead, out: &mut impl Write) -> Result<(), CliError> {
    let products = ctx.catalog.get_catalog().await?;
    session(ctx, &products, input, out)
}

fn session(
    ctx: &mut Context,
    products: &[Product],
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (notices, pending) = mpsc::channel::<String>();
    let cart_watch = ctx.stores.cart.subscribe(move |change| {
        let cart = change.state();
        let _ = notices.send(format!(
            "Cart: {} item(s), subtotal {}",
            cart.item_count(),
            format_usd(cart.subtotal())
        ));
    });

    let mut state = BrowseState::new();
    writeln!(
        out,
        "{} products loaded. Categories: {}. Type `help` for commands.",
        products.len(),
        FILTER_CATEGORIES.join(", ")
    )?;
    show_page(ctx, products, &state, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        tracing::debug!(?command, "Browse command");

        let total_count = catalog::query(products, state.query()).total_count;
        let rerender = match command {
            Command::Search(text) => {
                state.set_search(text);
                true
            }
            Command::Category(name) => {
                state.toggle_category(&name);
                true
            }
            Command::MaxPrice(price) => {
                state.set_max_price(price);
                if state.query().max_price.total_cmp(&price).is_ne() {
                    writeln!(out, "Max price snapped to {}", format_usd(state.query().max_price))?;
                }
                true
            }
            Command::Offers(on) => {
                state.set_offers_only(on);
                true
            }
            Command::Sort(key) => {
                state.set_sort(key);
                true
            }
            Command::Reset => {
                state.reset_filters();
                true
            }
            Command::Next => {
                if !state.next_page(total_count) {
                    writeln!(out, "Already on the last page")?;
                }
                true
            }
            Command::Prev => {
                if !state.prev_page() {
                    writeln!(out, "Already on the first page")?;
                }
                true
            }
            Command::Page(page) => {
                state.go_to_page(page, total_count);
                true
            }
            Command::Add(id) => {
                match products.iter().find(|p| p.id == id) {
                    Some(product) => {
                        ctx.stores.cart.dispatch(CartAction::add(product.clone()));
                    }
                    None => writeln!(out, "No product {id} in this catalog")?,
                }
                false
            }
            Command::Wish(id) => {
                match products.iter().find(|p| p.id == id) {
                    Some(product) => {
                        ctx.stores.wishlist.dispatch(WishlistAction::toggle(product.clone()));
                        let verb = if ctx.stores.wishlist.state().contains(id) { "Saved" } else { "Unsaved" };
                        writeln!(out, "{verb} {}", product.title)?;
                    }
                    None => writeln!(out, "No product {id} in this catalog")?,
                }
                false
            }
            Command::Cart => {
                render::cart(out, ctx.stores.cart.state(), ShippingMethod::default())?;
                false
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                false
            }
            Command::Quit => break,
        };

        for notice in pending.try_iter() {
            writeln!(out, "{notice}")?;
        }
        if rerender {
            show_page(ctx, products, &state, out)?;
        }
    }

    ctx.stores.cart.unsubscribe(cart_watch);
    Ok(())
}

fn show_page(
    ctx: &Context,
    products: &[Product],
    state: &BrowseState,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let page = catalog::query(products, state.query());
    render::catalog_page(out, &page, &ctx.stores)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::commands::test_support::{context, output, product};

    fn catalog() -> Vec<Product> {
        (1..=17)
            .map(|id| product(id, &format!("Item {id}"), f64::from(id) * 10.0))
            .collect()
    }

    fn run_session(ctx: &mut Context, script: &str) -> String {
        let mut buf = Vec::new();
        session(ctx, &catalog(), Cursor::new(script.to_string()), &mut buf).unwrap();
        output(buf)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("search red lamp".parse::<Command>(), Ok(Command::Search("red lamp".to_string())));
        assert_eq!("search".parse::<Command>(), Ok(Command::Search(String::new())));
        assert_eq!("SORT price-desc".parse::<Command>(), Ok(Command::Sort(SortKey::PriceDesc)));
        assert_eq!("offers on".parse::<Command>(), Ok(Command::Offers(true)));
        assert_eq!("add 4".parse::<Command>(), Ok(Command::Add(ProductId::new(4))));
        assert_eq!("max-price 75".parse::<Command>(), Ok(Command::MaxPrice(75.0)));
        assert!("add four".parse::<Command>().is_err());
        assert!("category".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_paging_and_page_reset() {
        let mut ctx = context();
        let text = run_session(&mut ctx, "next\nnext\nnext\nsort price-desc\nquit\n");
        assert!(text.contains("Page 1 of 3 (17 products)"));
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("Page 3 of 3"));
        assert!(text.contains("Already on the last page"));
        // Sorting sends the session back to the first page.
        assert!(text.trim_end().ends_with("Page 1 of 3 (17 products)"));
    }

    #[test]
    fn test_max_price_filter() {
        let mut ctx = context();
        let text = run_session(&mut ctx, "max-price 50\nmax-price 61\n");
        assert!(text.contains("Page 1 of 1 (5 products)"));
        assert!(text.contains("Max price snapped to $50.00"));
    }

    #[test]
    fn test_cart_notices_come_from_subscriber() {
        let mut ctx = context();
        let text = run_session(&mut ctx, "add 2\nadd 2\nadd 99\n");
        assert!(text.contains("Cart: 1 item(s), subtotal $20.00"));
        assert!(text.contains("Cart: 1 item(s), subtotal $40.00"));
        assert!(text.contains("No product 99 in this catalog"));
        assert_eq!(ctx.stores.cart.state().quantity_of(ProductId::new(2)), 2);
    }

    #[test]
    fn test_unknown_command_keeps_going() {
        let mut ctx = context();
        let text = run_session(&mut ctx, "dance\nwish 3\n");
        assert!(text.contains("unknown command"));
        assert!(text.contains("Saved Item 3"));
        assert!(ctx.stores.wishlist.state().contains(ProductId::new(3)));
    }
}
