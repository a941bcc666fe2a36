//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use marigold_core::ProductId;

use crate::catalog::{self, CategoryTab, ReviewItem};
use crate::error::Result;
use crate::filters;
use crate::market::types::Product;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub quantity: i64,
    pub image_url: String,
    pub category: String,
    pub owner_username: String,
    pub owner_id: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description.clone(),
            quantity: product.quantity,
            image_url: product.image_url.clone(),
            category: product.category.to_string(),
            owner_username: product.owner.username.clone(),
            owner_id: product.owner.id.to_string(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub reviews: Vec<ReviewItem>,
    pub tabs: Vec<CategoryTab>,
    pub logged_in: bool,
}

/// Display the product detail page.
///
/// Looks the product up in the cached catalog; an unknown identifier
/// produces a 404.
#[instrument(skip(state, user, id), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::from(id);
    let products = state.market().catalog().await?;
    let product = catalog::find_by_id(&products, &id)?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(product),
        reviews: catalog::review_items(&product.reviews),
        tabs: catalog::category_tabs(None),
        logged_in: user.is_some(),
    })
}
