//! "You may also like" picks for a product detail page.
//!
//! Neighbours come from an id window around the current product: the first
//! `end - start + 1` catalog products, where `start = max(1, id - 9)` and
//! `end = id + 9`. The current product is excluded and the rest shuffled.

use rand::Rng;
use rand::seq::SliceRandom;
use redcart_core::{Product, ProductId};

/// Maximum number of similar products returned.
pub const SIMILAR_COUNT: usize = 8;

/// Half-width of the id window.
const WINDOW_RADIUS: u32 = 9;

/// How many products to request from the catalog for `product_id`'s window.
#[must_use]
pub fn similar_window(product_id: ProductId) -> u32 {
    let id = product_id.as_u32();
    let start = id.saturating_sub(WINDOW_RADIUS).max(1);
    let end = id.saturating_add(WINDOW_RADIUS);
    end - start + 1
}

/// Shuffle `candidates`, drop `current`, and keep at most [`SIMILAR_COUNT`].
pub fn pick_similar<R: Rng + ?Sized>(
    candidates: Vec<Product>,
    current: ProductId,
    rng: &mut R,
) -> Vec<Product> {
    let mut picks: Vec<Product> = candidates
        .into_iter()
        .filter(|product| product.id != current)
        .collect();
    picks.shuffle(rng);
    picks.truncate(SIMILAR_COUNT);
    picks
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::tests::product;

    #[test]
    fn test_similar_window() {
        assert_eq!(similar_window(ProductId::new(1)), 10);
        assert_eq!(similar_window(ProductId::new(5)), 14);
        assert_eq!(similar_window(ProductId::new(10)), 19);
        assert_eq!(similar_window(ProductId::new(50)), 19);
    }

    #[test]
    fn test_pick_similar_excludes_current_and_caps() {
        let candidates: Vec<Product> = (1..=19)
            .map(|id| product(id, "P", "misc", 1.0))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = pick_similar(candidates, ProductId::new(10), &mut rng);
        assert_eq!(picks.len(), SIMILAR_COUNT);
        assert!(picks.iter().all(|p| p.id != ProductId::new(10)));

        let mut ids: Vec<u32> = picks.iter().map(|p| p.id.as_u32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SIMILAR_COUNT);
    }

    #[test]
    fn test_pick_similar_small_catalog() {
        let candidates = vec![product(1, "A", "misc", 1.0), product(2, "B", "misc", 1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let picks = pick_similar(candidates, ProductId::new(1), &mut rng);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, ProductId::new(2));
    }
}
