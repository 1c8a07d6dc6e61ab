//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Handlers translate form posts into cart container operations and render
//! fragments; the container itself never fails, so these handlers never do
//! either.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use souq_core::{CartLineItem, ItemId, price_or_zero};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub line_total: f64,
    pub image: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub original_price: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: f64,
    pub count: u32,
}

impl CartView {
    /// Snapshot the cart container into display data.
    pub(crate) fn snapshot(state: &AppState) -> Self {
        let items = state
            .cart()
            .line_items()
            .into_iter()
            .map(|row| CartItemView {
                id: row.id.to_string(),
                line_total: price_or_zero(&row.display_price) * f64::from(row.quantity),
                name: row.name,
                price: row.display_price,
                image: row.image_ref,
                color: row.color.unwrap_or_default(),
                size: row.size.unwrap_or_default(),
                quantity: row.quantity,
                original_price: row.original_display_price,
            })
            .collect();

        Self {
            items,
            subtotal: state.cart().cart_total(),
            count: state.cart().cart_count(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data: the full item shape, posted by the product page.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub name: String,
    pub display_price: String,
    pub image_ref: String,
    pub quantity: Option<u32>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub original_display_price: Option<String>,
    pub category: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Unselected form fields arrive as empty strings, not absent ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::snapshot(&state),
    }
}

/// Add item to cart (HTMX).
///
/// Merges into an existing row with the same `(id, color, size)` or appends
/// a new one. Returns the count badge with an HTMX trigger so other cart
/// elements refresh.
#[instrument(skip(state, form))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let item = CartLineItem {
        id: ItemId::parse(&form.id),
        name: form.name,
        display_price: form.display_price,
        image_ref: form.image_ref,
        quantity: form.quantity.unwrap_or(1),
        color: non_empty(form.color),
        size: non_empty(form.size),
        original_display_price: non_empty(form.original_display_price),
        category: non_empty(form.category),
    };
    state.cart().add_line_item(item);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: state.cart().cart_count(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX).
///
/// A quantity below one is rejected by the container; the fragment then
/// simply re-renders the unchanged cart.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let id = ItemId::parse(&form.id);
    state.cart().update_quantity(
        &id,
        non_empty(form.color).as_deref(),
        non_empty(form.size).as_deref(),
        form.quantity,
    );

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::snapshot(&state),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveFromCartForm>) -> Response {
    let id = ItemId::parse(&form.id);
    state.cart().remove_line_item(
        &id,
        non_empty(form.color).as_deref(),
        non_empty(form.size).as_deref(),
    );

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::snapshot(&state),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX). Favorites are untouched.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    state.cart().clear_cart();

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::snapshot(&state),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().cart_count(),
    }
}
