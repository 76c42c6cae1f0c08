//! Catalog entities as served by the catalog API.
//!
//! Products are read-only from the storefront's point of view: they are
//! fetched, filtered, snapshotted into the cart or wishlist, but never edited.

use serde::{Deserialize, Serialize};

use super::id::{CommentId, PostId, ProductId, UserId};

/// A catalog product.
///
/// Field names follow the catalog API's camelCase JSON. Fields the storefront
/// does not use (images, tags, dimensions, ...) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Some categories (groceries, for one) carry no brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Whether the product is on offer (non-zero discount).
    #[must_use]
    pub fn has_offer(&self) -> bool {
        self.discount_percentage.is_some_and(|d| d > 0.0)
    }

    /// The pre-discount price shown struck through next to `price`.
    ///
    /// Returns `None` when there is no discount or the discount is 100% or
    /// more (the division would be meaningless).
    #[must_use]
    pub fn original_price(&self) -> Option<f64> {
        let discount = self.discount_percentage?;
        if discount <= 0.0 || discount >= 100.0 {
            return None;
        }
        Some(self.price / (1.0 - discount / 100.0))
    }

    /// Star breakdown of the product rating.
    #[must_use]
    pub fn stars(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }
}

/// A five-star rating split into full, half and empty stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Number of stars in a rating display.
    pub const MAX: u8 = 5;

    /// Build a star display from a rating; a fractional part of at least 0.5
    /// earns a half star. Out-of-range ratings are clamped to `0..=5`.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, f64::from(Self::MAX))
        } else {
            0.0
        };
        let floor = rating.floor();
        // Clamped to 0..=5 above, so the truncation is exact.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full = floor as u8;
        let half = full < Self::MAX && rating - floor >= 0.5;
        let empty = Self::MAX - full - u8::from(half);
        Self { full, half, empty }
    }
}

/// Author of a [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

/// A comment from the catalog API, shown as a product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    #[serde(default)]
    pub post_id: Option<PostId>,
    #[serde(default)]
    pub likes: u32,
    pub user: CommentUser,
}

impl Comment {
    /// Comments carry no score of their own; reviews display a sample score
    /// derived from the comment id, kept within one to five stars.
    #[must_use]
    pub fn sample_rating(&self) -> u8 {
        // `% 5` keeps the value below 5, so it always fits in a u8.
        #[allow(clippy::cast_possible_truncation)]
        let score = (self.id.as_u32() % 5) as u8;
        score.clamp(1, 5)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 1,
        "title": "Essence Mascara Lash Princess",
        "description": "Popular mascara",
        "category": "beauty",
        "price": 9.99,
        "discountPercentage": 7.17,
        "rating": 4.94,
        "stock": 5,
        "tags": ["beauty", "mascara"],
        "brand": "Essence",
        "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/thumbnail.png"
    }"#;

    #[test]
    fn test_decode_catalog_product() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.discount_percentage, Some(7.17));
        assert_eq!(product.stock, 5);
        assert!(product.has_offer());
    }

    #[test]
    fn test_decode_product_without_brand() {
        let product: Product =
            serde_json::from_str(r#"{"id": 16, "title": "Apple", "category": "groceries", "price": 1.99}"#)
                .unwrap();
        assert!(product.brand.is_none());
        assert!(!product.has_offer());
        assert!(product.original_price().is_none());
    }

    #[test]
    fn test_original_price() {
        let mut product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        product.price = 75.0;
        product.discount_percentage = Some(25.0);
        assert!((product.original_price().unwrap() - 100.0).abs() < 1e-9);

        product.discount_percentage = Some(100.0);
        assert!(product.original_price().is_none());
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(
            StarRating::from_rating(4.94),
            StarRating { full: 4, half: true, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(3.2),
            StarRating { full: 3, half: false, empty: 2 }
        );
        assert_eq!(
            StarRating::from_rating(5.0),
            StarRating { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(-1.0),
            StarRating { full: 0, half: false, empty: 5 }
        );
    }

    #[test]
    fn test_comment_sample_rating() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 10, "body": "Nice", "postId": 6, "likes": 3,
                "user": {"id": 63, "username": "eburras1q", "fullName": "Emmett Burras"}}"#,
        )
        .unwrap();
        assert_eq!(comment.sample_rating(), 1);
        assert_eq!(comment.user.full_name, "Emmett Burras");

        let comment = Comment {
            id: CommentId::new(8),
            ..comment
        };
        assert_eq!(comment.sample_rating(), 3);
    }
}
