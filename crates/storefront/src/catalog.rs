//! Catalog selection over the fetched product array.
//!
//! The backend serves the whole catalog in one page, so product pages work
//! against the in-memory array: a linear lookup by identifier, a linear
//! category filter, and a review-to-display-item pass. Nothing here touches
//! the network.

use marigold_core::{Category, ProductId, ReviewId};
use thiserror::Error;

use crate::market::{Product, Review};

/// Errors from catalog selection.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the requested identifier.
    #[error("product not found: {id}")]
    NotFound { id: ProductId },
}

/// Find the first product whose identifier equals `id`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when no product matches; callers map
/// that to a 404 rather than panicking on an empty filter result.
pub fn find_by_id<'a>(products: &'a [Product], id: &ProductId) -> Result<&'a Product, CatalogError> {
    products
        .iter()
        .find(|product| product.id == *id)
        .ok_or_else(|| CatalogError::NotFound { id: id.clone() })
}

/// Keep only the products in `category`, preserving catalog order.
#[must_use]
pub fn filter_by_category(products: &[Product], category: Category) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}

/// One review prepared for rendering.
///
/// Carries the source review's identifier as a stable key so templates can
/// key list items the same way across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub key: ReviewId,
    pub stars: String,
    pub comment: String,
    pub reviewer: String,
}

/// Build display items for a product's reviews.
///
/// Same length, same order as the input; no filtering and no mutation.
#[must_use]
pub fn review_items(reviews: &[Review]) -> Vec<ReviewItem> {
    reviews
        .iter()
        .map(|review| {
            let filled = usize::try_from(review.rating.clamp(0, 5)).unwrap_or(0);
            ReviewItem {
                key: review.id.clone(),
                stars: "★".repeat(filled) + &"☆".repeat(5 - filled),
                comment: review.comment.clone(),
                reviewer: review.reviewer.clone(),
            }
        })
        .collect()
}

/// One entry in the category tab bar.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Build the category tab bar, with "All" first.
///
/// `active` of `None` marks the unfiltered view.
#[must_use]
pub fn category_tabs(active: Option<Category>) -> Vec<CategoryTab> {
    let mut tabs = vec![CategoryTab {
        label: "All",
        href: "/".to_string(),
        active: active.is_none(),
    }];

    tabs.extend(Category::ALL.into_iter().map(|category| CategoryTab {
        label: category.as_str(),
        href: format!("/?category={}", urlencoding::encode(category.as_str())),
        active: active == Some(category),
    }));

    tabs
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use marigold_core::{Price, UserId};
    use rust_decimal::Decimal;

    use crate::market::ProductOwner;

    fn product(id: &str, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            price: Price::new(Decimal::new(500, 2)),
            description: String::new(),
            quantity: 1,
            image_url: String::new(),
            category,
            owner: ProductOwner {
                id: UserId::new("u1"),
                username: "ada".to_string(),
            },
            reviews: vec![],
        }
    }

    fn review(id: &str, rating: i64) -> Review {
        Review {
            id: ReviewId::new(id),
            rating,
            comment: format!("comment {id}"),
            reviewer: "grace".to_string(),
        }
    }

    #[test]
    fn test_find_by_id_returns_the_matching_product() {
        let products = vec![
            product("p1", Category::Electronics),
            product("p2", Category::ToysAndGames),
        ];

        let found = find_by_id(&products, &ProductId::new("p2")).unwrap();
        assert_eq!(found.id, ProductId::new("p2"));
    }

    #[test]
    fn test_find_by_id_missing_is_not_found_not_a_panic() {
        let products = vec![product("p1", Category::Electronics)];

        let result = find_by_id(&products, &ProductId::new("nope"));
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_find_by_id_on_empty_catalog() {
        let result = find_by_id(&[], &ProductId::new("p1"));
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let products = vec![
            product("p1", Category::Electronics),
            product("p2", Category::HomeAndLiving),
            product("p3", Category::Electronics),
        ];

        let filtered = filter_by_category(&products, Category::Electronics);
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);
    }

    #[test]
    fn test_review_items_preserve_length_order_and_keys() {
        let reviews = vec![review("r1", 5), review("r2", 3), review("r3", 1)];

        let items = review_items(&reviews);
        assert_eq!(items.len(), reviews.len());

        let keys: Vec<&str> = items.iter().map(|item| item.key.as_str()).collect();
        assert_eq!(keys, ["r1", "r2", "r3"]);
    }

    #[test]
    fn test_review_items_star_rendering_clamps() {
        let items = review_items(&[review("r1", 4), review("r2", 9), review("r3", -2)]);

        assert_eq!(items[0].stars, "★★★★☆");
        assert_eq!(items[1].stars, "★★★★★");
        assert_eq!(items[2].stars, "☆☆☆☆☆");
    }

    #[test]
    fn test_category_tabs_mark_the_active_entry() {
        let tabs = category_tabs(Some(Category::ToysAndGames));
        assert_eq!(tabs.len(), 5);
        assert!(!tabs[0].active);

        let active: Vec<&str> = tabs
            .iter()
            .filter(|tab| tab.active)
            .map(|tab| tab.label)
            .collect();
        assert_eq!(active, ["Toys & Games"]);
    }

    #[test]
    fn test_category_tabs_all_is_active_without_filter() {
        let tabs = category_tabs(None);
        assert!(tabs[0].active);
        assert_eq!(tabs[0].href, "/");
        assert!(tabs.iter().skip(1).all(|tab| !tab.active));
    }

    #[test]
    fn test_category_tab_hrefs_are_encoded() {
        let tabs = category_tabs(None);
        let fashion = tabs
            .iter()
            .find(|tab| tab.label == "Fashion & Accessories")
            .unwrap();
        assert_eq!(fashion.href, "/?category=Fashion%20%26%20Accessories");
    }
}
