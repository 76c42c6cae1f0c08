//! Catalog listing and product detail commands.

use std::collections::BTreeSet;
use std::io::Write;

use clap::Args;
use redcart_core::{ProductId, format_usd};
use redcart_storefront::catalog::{self, CatalogQuery, DEFAULT_MAX_PRICE, SortKey};

use super::render;
use super::{CliError, Context};

/// Query flags for `redcart products`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive title search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category filter; repeat for several (any match)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Maximum price, inclusive
    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,

    /// Only products with a discount
    #[arg(long)]
    pub offers: bool,

    /// Sort order: none, price-asc, price-desc, rating-desc
    #[arg(long, default_value = "none")]
    pub sort: SortKey,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    #[must_use]
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            search_text: self.search.clone(),
            selected_categories: self.categories.iter().cloned().collect::<BTreeSet<_>>(),
            max_price: self.max_price,
            offers_only: self.offers,
            sort_key: self.sort,
            page: self.page,
        }
    }
}

/// Print one page of the filtered catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or output fails.
pub async fn list(ctx: &Context, args: &ListArgs, out: &mut impl Write) -> Result<(), CliError> {
    let products = ctx.catalog.get_catalog().await?;
    let page = catalog::query(&products, &args.to_query());
    render::catalog_page(out, &page, &ctx.stores)?;
    Ok(())
}

/// Print a product, its reviews and some similar products.
///
/// # Errors
///
/// Returns an error if the product, reviews or similar products cannot be
/// fetched, or output fails.
pub async fn show(ctx: &Context, id: ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let product = ctx.catalog.get_product(id).await?;
    let (reviews, similar) = tokio::try_join!(ctx.catalog.get_reviews(), ctx.catalog.get_similar(id))?;

    writeln!(out, "{}", product.title)?;
    if let Some(brand) = &product.brand {
        writeln!(out, "by {brand}")?;
    }
    writeln!(out, "{}", product.description)?;
    match product.original_price() {
        Some(original) => writeln!(
            out,
            "Price: {}  (was {}, -{:.0}%)",
            format_usd(product.price),
            format_usd(original),
            product.discount_percentage.unwrap_or_default()
        )?,
        None => writeln!(out, "Price: {}", format_usd(product.price))?,
    }
    writeln!(
        out,
        "Rating: {} {:.2}  |  In stock: {}",
        render::stars(product.stars()),
        product.rating,
        product.stock
    )?;

    writeln!(out, "\nReviews")?;
    for review in &reviews {
        writeln!(
            out,
            "  {} @{}: {}",
            "★".repeat(usize::from(review.sample_rating())),
            review.user.username,
            review.body
        )?;
    }

    if !similar.is_empty() {
        writeln!(out, "\nYou may also like")?;
        for product in &similar {
            render::product_line(out, product, &ctx.stores)?;
        }
    }
    Ok(())
}
