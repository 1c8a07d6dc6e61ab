//! Favorites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use souq_core::{FavoriteItem, ItemId};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Favorite display data for templates.
#[derive(Clone)]
pub struct FavoriteView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub original_price: Option<String>,
    pub category: Option<String>,
}

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites/index.html")]
pub struct FavoritesTemplate {
    pub items: Vec<FavoriteView>,
}

/// Favorite toggle button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/favorite_button.html")]
pub struct FavoriteButtonTemplate {
    pub item: FavoriteView,
    pub is_favorite: bool,
}

/// Toggle favorite form data: the full item shape, so an add can store it.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteForm {
    pub id: String,
    pub name: String,
    pub display_price: String,
    pub image_ref: String,
    pub original_display_price: Option<String>,
    pub category: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Display favorites page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let items = state
        .cart()
        .favorites()
        .into_iter()
        .map(|fav| FavoriteView {
            id: fav.id.to_string(),
            name: fav.name,
            price: fav.display_price,
            image: fav.image_ref,
            original_price: fav.original_display_price,
            category: fav.category,
        })
        .collect();

    FavoritesTemplate { items }
}

/// Toggle an item in the favorites set (HTMX).
///
/// Toggling twice with the same item is a no-op overall; the returned
/// fragment re-renders the button in its new state.
#[instrument(skip(state, form))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ToggleFavoriteForm>,
) -> Response {
    let id = ItemId::parse(&form.id);
    let item = FavoriteItem {
        id: id.clone(),
        name: form.name,
        display_price: form.display_price,
        image_ref: form.image_ref,
        original_display_price: non_empty(form.original_display_price),
        category: non_empty(form.category),
    };

    let view = FavoriteView {
        id: item.id.to_string(),
        name: item.name.clone(),
        price: item.display_price.clone(),
        image: item.image_ref.clone(),
        original_price: item.original_display_price.clone(),
        category: item.category.clone(),
    };

    state.cart().toggle_favorite(item);

    FavoriteButtonTemplate {
        item: view,
        is_favorite: state.cart().is_favorite(&id),
    }
    .into_response()
}
