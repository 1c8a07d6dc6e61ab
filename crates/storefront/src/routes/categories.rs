//! Category and sub-category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use souq_core::ItemId;
use tracing::instrument;

use crate::filters;
use crate::routes::catalog_error_page;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryCardView {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryCardView>,
}

/// Sub-category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub subcategories: Vec<CategoryCardView>,
}

/// Sub-category product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/products.html")]
pub struct SubCategoryProductsTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display category listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    match state.catalog().categories().await {
        Ok(categories) => CategoriesIndexTemplate {
            categories: categories
                .iter()
                .map(|c| CategoryCardView {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                    image: c.image.clone(),
                })
                .collect(),
        }
        .into_response(),
        Err(e) => catalog_error_page(&e, "/categories"),
    }
}

/// Display the sub-categories of a category.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = ItemId::parse(&id);
    match state.catalog().subcategories(&id).await {
        Ok(subcategories) => CategoryShowTemplate {
            subcategories: subcategories
                .iter()
                .map(|s| CategoryCardView {
                    id: s.id.to_string(),
                    name: s.name.clone(),
                    image: s.image.clone(),
                })
                .collect(),
        }
        .into_response(),
        Err(e) => catalog_error_page(&e, &format!("/categories/{id}")),
    }
}

/// Display the products of a sub-category.
#[instrument(skip(state))]
pub async fn subcategory(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = ItemId::parse(&id);
    match state.catalog().subcategory_products(&id).await {
        Ok(products) => SubCategoryProductsTemplate {
            products: products
                .iter()
                .map(|p| ProductCardView::from_product(p, &state))
                .collect(),
        }
        .into_response(),
        Err(e) => catalog_error_page(&e, &format!("/subcategories/{id}")),
    }
}
