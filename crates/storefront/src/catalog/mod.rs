//! Catalog query pipeline.
//!
//! [`query`] turns the fetched product list and a [`CatalogQuery`] into one
//! page of results. The steps always run in the same order:
//!
//! 1. title search (case-insensitive substring, empty matches everything)
//! 2. category filter (any selected category is a substring of the product's)
//! 3. price ceiling (inclusive)
//! 4. offers-only (non-zero discount)
//! 5. stable sort
//! 6. pagination, [`PAGE_SIZE`] products per 1-indexed page

pub mod browse;
pub mod similar;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use redcart_core::Product;
use serde::{Deserialize, Serialize};

pub use browse::BrowseState;
pub use similar::{SIMILAR_COUNT, pick_similar, similar_window};

/// Products per catalog page.
pub const PAGE_SIZE: usize = 8;

/// Price ceiling of the filter panel, and the default `max_price`.
pub const DEFAULT_MAX_PRICE: f64 = 500.0;

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::None, Self::PriceAsc, Self::PriceDesc, Self::RatingDesc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::RatingDesc => "rating-desc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::PriceAsc => a.price.total_cmp(&b.price),
            Self::PriceDesc => b.price.total_cmp(&a.price),
            Self::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::None);
        }
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

/// Search, filter, sort and page selection for one catalog view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search_text: String,
    /// Empty means "all categories".
    pub selected_categories: BTreeSet<String>,
    pub max_price: f64,
    pub offers_only: bool,
    pub sort_key: SortKey,
    /// 1-indexed; 0 is read as 1.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_categories: BTreeSet::new(),
            max_price: DEFAULT_MAX_PRICE,
            offers_only: false,
            sort_key: SortKey::None,
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Whether `product` passes every filter step.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search_text.to_lowercase();
        self.matches_lowered(product, &search)
    }

    fn matches_lowered(&self, product: &Product, search: &str) -> bool {
        if !product.title.to_lowercase().contains(search) {
            return false;
        }
        if !self.selected_categories.is_empty() {
            let category = product.category.to_lowercase();
            if !self
                .selected_categories
                .iter()
                .any(|selected| category.contains(&selected.to_lowercase()))
            {
                return false;
            }
        }
        // NaN on either side fails the `price <= max_price` test.
        if product.price.partial_cmp(&self.max_price).is_none_or(Ordering::is_gt) {
            return false;
        }
        !self.offers_only || product.has_offer()
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages.
    pub total_count: usize,
}

impl CatalogPage {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `count` products.
#[must_use]
pub const fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Run the full pipeline over `products`.
///
/// A page past the end yields an empty `items` list rather than an error.
#[must_use]
pub fn query(products: &[Product], query: &CatalogQuery) -> CatalogPage {
    let search = query.search_text.to_lowercase();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|product| query.matches_lowered(product, &search))
        .collect();

    if query.sort_key != SortKey::None {
        // `sort_by` is stable: ties keep catalog order.
        matched.sort_by(|a, b| query.sort_key.compare(a, b));
    }

    let total_count = matched.len();
    let page = query.page.max(1);
    let items = matched
        .into_iter()
        .skip((page - 1).saturating_mul(PAGE_SIZE))
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    CatalogPage {
        items,
        page,
        total_pages: total_pages(total_count),
        total_count,
    }
}
