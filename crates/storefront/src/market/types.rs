//! Domain types for marketplace data.
//!
//! These are the shapes the rest of the storefront works with. The wire
//! format the backend actually speaks lives in the client's conversion
//! layer; nothing outside the client sees backend field names.

use marigold_core::{Category, Email, Price, ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A product listed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Listed price.
    pub price: Price,
    /// Seller-provided description.
    pub description: String,
    /// Units in stock.
    pub quantity: i64,
    /// Image URL as the backend serves it.
    pub image_url: String,
    /// Category label.
    pub category: Category,
    /// The seller who listed this product.
    pub owner: ProductOwner,
    /// Reviews, in the order the backend returns them.
    pub reviews: Vec<Review>,
}

/// The seller who listed a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOwner {
    pub id: UserId,
    pub username: String,
}

/// A review left on a product.
///
/// Reviews are read-only here; the storefront never mutates them. The
/// backend substitutes `"Deleted User"` for the reviewer when the account
/// no longer exists, and the storefront displays whatever it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Backend-assigned identifier, used as a stable rendering key.
    pub id: ReviewId,
    /// Star rating.
    pub rating: i64,
    /// Review body.
    pub comment: String,
    /// Reviewer display name.
    pub reviewer: String,
}

/// Login credentials submitted to `POST {base}/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// New-account payload submitted to `POST {base}/signup`.
///
/// Field names follow the backend's wire contract, which is camelCase.
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}
