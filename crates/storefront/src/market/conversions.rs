//! Wire format of the market API and conversions into domain types.

use marigold_core::{Category, Price};
use serde::Deserialize;

use super::MarketError;
use super::types::{Product, ProductOwner, Review};

// =============================================================================
// Response envelopes
// =============================================================================

/// Envelope for `GET /api/product/all`.
#[derive(Debug, Deserialize)]
pub(super) struct CatalogResponse {
    pub success: bool,
    #[serde(default)]
    pub products: Option<Vec<ProductData>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for `POST /login`.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    pub success: bool,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for `POST /signup`.
#[derive(Debug, Deserialize)]
pub(super) struct SignupResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Wire records
// =============================================================================

/// Product record as the backend serializes it (`desc`, `qty`, `img`).
#[derive(Debug, Deserialize)]
pub(super) struct ProductData {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub desc: String,
    pub qty: i64,
    pub img: String,
    pub category: Category,
    pub user: OwnerData,
    #[serde(default)]
    pub reviews: Vec<ReviewData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnerData {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewData {
    pub id: String,
    pub rating: i64,
    pub comment: String,
    pub user: String,
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert a wire product record into the domain type.
///
/// Prices arrive as JSON numbers; NaN or infinite values are rejected here
/// so they never reach a template.
pub(super) fn convert_product(data: ProductData) -> Result<Product, MarketError> {
    let price = Price::try_from(data.price).map_err(|_| MarketError::Malformed("price"))?;

    Ok(Product {
        id: data.id.into(),
        name: data.name,
        price,
        description: data.desc,
        quantity: data.qty,
        image_url: data.img,
        category: data.category,
        owner: ProductOwner {
            id: data.user.user_id.into(),
            username: data.user.username,
        },
        reviews: data.reviews.into_iter().map(convert_review).collect(),
    })
}

fn convert_review(data: ReviewData) -> Review {
    Review {
        id: data.id.into(),
        rating: data.rating,
        comment: data.comment,
        reviewer: data.user,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use marigold_core::{ProductId, ReviewId};

    const PRODUCT_JSON: &str = r#"{
        "id": "p1",
        "name": "Mechanical Keyboard",
        "price": 89.99,
        "desc": "Tactile switches, barely used.",
        "qty": 3,
        "img": "/static/product_pics/keyboard.jpg",
        "category": "Electronics",
        "user": {"userId": "u7", "username": "ada"},
        "reviews": [
            {"id": "r1", "rating": 5, "comment": "Clacky.", "user": "grace"},
            {"id": "r2", "rating": 3, "comment": "Loud.", "user": "Deleted User"}
        ]
    }"#;

    #[test]
    fn test_deserialize_wire_product() {
        let data: ProductData = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(data.category, Category::Electronics);
        assert_eq!(data.user.user_id, "u7");
        assert_eq!(data.reviews.len(), 2);
    }

    #[test]
    fn test_convert_product_maps_fields() {
        let data: ProductData = serde_json::from_str(PRODUCT_JSON).unwrap();
        let product = convert_product(data).unwrap();

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price.display(), "$89.99");
        assert_eq!(product.description, "Tactile switches, barely used.");
        assert_eq!(product.image_url, "/static/product_pics/keyboard.jpg");
        assert_eq!(product.owner.username, "ada");

        // Review order and identifiers survive conversion
        let keys: Vec<&ReviewId> = product.reviews.iter().map(|r| &r.id).collect();
        assert_eq!(keys, [&ReviewId::new("r1"), &ReviewId::new("r2")]);
        assert_eq!(product.reviews[1].reviewer, "Deleted User");
    }

    #[test]
    fn test_convert_product_rejects_non_finite_price() {
        let data = ProductData {
            id: "p1".to_string(),
            name: "Broken".to_string(),
            price: f64::NAN,
            desc: String::new(),
            qty: 0,
            img: String::new(),
            category: Category::Electronics,
            user: OwnerData {
                user_id: "u1".to_string(),
                username: "ada".to_string(),
            },
            reviews: vec![],
        };

        assert!(matches!(
            convert_product(data),
            Err(MarketError::Malformed("price"))
        ));
    }

    #[test]
    fn test_deserialize_rejects_unknown_category() {
        let json = PRODUCT_JSON.replace("Electronics", "Groceries");
        assert!(serde_json::from_str::<ProductData>(&json).is_err());
    }

    #[test]
    fn test_login_response_user_id_is_camel_case() {
        let envelope: LoginResponse =
            serde_json::from_str(r#"{"success": true, "userId": "u1"}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.user_id.as_deref(), Some("u1"));
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let envelope: SignupResponse =
            serde_json::from_str(r#"{"success": false, "message": "This username is taken."}"#)
                .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("This username is taken."));
    }
}
