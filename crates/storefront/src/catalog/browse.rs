//! Browse session state.
//!
//! A [`BrowseState`] is the query a shopper is building up interactively:
//! search box, filter panel, sort menu and pager. Changing anything except
//! the page sends the shopper back to page 1.

use super::{CatalogQuery, DEFAULT_MAX_PRICE, SortKey, total_pages};

/// Categories offered by the filter panel.
pub const FILTER_CATEGORIES: [&str; 5] = ["Food", "Accessories", "Fruits", "Watch", "Perfumes"];

/// Granularity of the price slider.
pub const PRICE_STEP: f64 = 25.0;

/// Interactive catalog query with the page-reset rule built in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    query: CatalogQuery,
}

impl BrowseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query to run against the catalog.
    #[must_use]
    pub const fn query(&self) -> &CatalogQuery {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.query.page
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.query.search_text != text {
            self.query.search_text = text;
            self.reset_page();
        }
    }

    /// Select `category` if unselected, otherwise deselect it.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.query.selected_categories.remove(category) {
            self.query.selected_categories.insert(category.to_string());
        }
        self.reset_page();
    }

    /// Set the price ceiling, snapped to the slider: clamped to
    /// `0..=500` and rounded to the nearest [`PRICE_STEP`].
    pub fn set_max_price(&mut self, max_price: f64) {
        let snapped = snap_price(max_price);
        if self.query.max_price.total_cmp(&snapped).is_ne() {
            self.query.max_price = snapped;
            self.reset_page();
        }
    }

    pub fn set_offers_only(&mut self, offers_only: bool) {
        if self.query.offers_only != offers_only {
            self.query.offers_only = offers_only;
            self.reset_page();
        }
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        if self.query.sort_key != sort_key {
            self.query.sort_key = sort_key;
            self.reset_page();
        }
    }

    /// Restore the filter panel defaults. Search and sort are kept.
    pub fn reset_filters(&mut self) {
        self.query.selected_categories.clear();
        self.query.max_price = DEFAULT_MAX_PRICE;
        self.query.offers_only = false;
        self.reset_page();
    }

    /// Advance one page if `total_count` results leave room. Returns whether
    /// the page moved.
    pub fn next_page(&mut self, total_count: usize) -> bool {
        if self.query.page < total_pages(total_count) {
            self.query.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.query.page > 1 {
            self.query.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to `1..=total_pages` (page 1 when empty).
    pub fn go_to_page(&mut self, page: usize, total_count: usize) {
        self.query.page = page.clamp(1, total_pages(total_count).max(1));
    }

    fn reset_page(&mut self) {
        self.query.page = 1;
    }
}

/// Clamp `price` to the slider range and round it to the nearest step.
#[must_use]
pub fn snap_price(price: f64) -> f64 {
    if !price.is_finite() {
        return DEFAULT_MAX_PRICE;
    }
    ((price.clamp(0.0, DEFAULT_MAX_PRICE) / PRICE_STEP).round() * PRICE_STEP).min(DEFAULT_MAX_PRICE)
}
