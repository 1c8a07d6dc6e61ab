//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use souq_core::ItemId;
use tracing::instrument;

use crate::catalog::Product;
use crate::filters;
use crate::routes::catalog_error_page;
use crate::state::AppState;

/// Product display data for card grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub old_price: Option<String>,
    pub image: String,
    pub category: Option<String>,
    pub is_favorite: bool,
}

impl ProductCardView {
    pub(crate) fn from_product(product: &Product, state: &AppState) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.clone(),
            old_price: product.old_price.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            is_favorite: state.cart().is_favorite(&product.id),
        }
    }
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub old_price: Option<String>,
    pub image: String,
    pub description: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub rating: Option<f32>,
    pub category: Option<String>,
    pub is_favorite: bool,
}

impl ProductDetailView {
    fn from_product(product: &Product, state: &AppState) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.clone(),
            old_price: product.old_price.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            rating: product.rating,
            category: product.category.clone(),
            is_favorite: state.cart().is_favorite(&product.id),
        }
    }
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub query: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub similar: Vec<ProductCardView>,
}

/// Display product listing page, filtered by an optional search substring.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    let products = match state.catalog().latest_products().await {
        Ok(products) => products,
        Err(e) => return catalog_error_page(&e, "/products"),
    };

    let needle = query.q.unwrap_or_default();
    let needle_lower = needle.to_lowercase();
    let products = products
        .iter()
        .filter(|p| needle_lower.is_empty() || p.name.to_lowercase().contains(&needle_lower))
        .map(|p| ProductCardView::from_product(p, &state))
        .collect();

    ProductsIndexTemplate {
        products,
        query: needle,
    }
    .into_response()
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = ItemId::parse(&id);
    match state.catalog().product(&id).await {
        Ok(detail) => {
            let similar = detail
                .similar_products
                .iter()
                .map(|p| ProductCardView::from_product(p, &state))
                .collect();
            ProductShowTemplate {
                product: ProductDetailView::from_product(&detail.product, &state),
                similar,
            }
            .into_response()
        }
        Err(e) => catalog_error_page(&e, &format!("/products/{id}")),
    }
}
