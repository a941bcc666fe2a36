//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use marigold_core::Category;

use crate::catalog::{self, CategoryTab};
use crate::filters;
use crate::market::types::Product;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Product display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub category: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            image_url: product.image_url.clone(),
            category: product.category.to_string(),
        }
    }
}

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub tabs: Vec<CategoryTab>,
    pub logged_in: bool,
    pub fetch_failed: bool,
}

/// Display the home page catalog grid.
///
/// An unknown `?category=` value is ignored and the full catalog is shown.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let selected = query
        .category
        .as_deref()
        .and_then(|label| label.parse::<Category>().ok());

    let (catalog, fetch_failed) = match state.market().catalog().await {
        Ok(products) => (products, false),
        Err(e) => {
            tracing::error!("Failed to fetch catalog: {e}");
            (std::sync::Arc::new(Vec::new()), true)
        }
    };

    let products: Vec<ProductCardView> = match selected {
        Some(category) => catalog::filter_by_category(&catalog, category)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
        None => catalog.iter().map(ProductCardView::from).collect(),
    };

    HomeTemplate {
        products,
        tabs: catalog::category_tabs(selected),
        logged_in: user.is_some(),
        fetch_failed,
    }
}
