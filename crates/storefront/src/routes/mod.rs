//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Catalog browsing
//! GET  /categories              - Category listing
//! GET  /categories/{id}         - Sub-categories of a category
//! GET  /subcategories/{id}      - Products of a sub-category
//! GET  /products                - Product listing (?q= substring filter)
//! GET  /products/{id}           - Product detail with similar products
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart (returns count fragment)
//! POST /cart/update             - Update quantity (returns cart_items fragment)
//! POST /cart/remove             - Remove item (returns cart_items fragment)
//! POST /cart/clear              - Empty the cart (returns cart_items fragment)
//! GET  /cart/count              - Cart count badge (fragment)
//!
//! # Favorites
//! GET  /favorites               - Favorites page
//! POST /favorites/toggle        - Toggle favorite (returns button fragment)
//!
//! # Checkout
//! GET  /checkout                - Order summary
//! POST /checkout/coupon         - Apply a coupon code
//! POST /checkout/confirm        - Confirm order (clears the cart)
//!
//! # Auth (delegated to the external auth service)
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! GET  /auth/register           - Register page
//! POST /auth/register           - Register action
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod favorites;
pub mod home;
pub mod products;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::catalog::CatalogError;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Inline error state with a manual retry link.
///
/// Every catalog-backed page degrades to this on fetch failure; retry is a
/// full reload of the same page, never automatic.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorRetryTemplate {
    pub message: String,
    pub retry_href: String,
}

/// Render a catalog failure as an inline error page with a retry link.
pub(crate) fn catalog_error_page(err: &CatalogError, retry_href: &str) -> Response {
    tracing::warn!(error = %err, retry_href, "catalog fetch failed");

    let (status, message) = match err {
        CatalogError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            "This item could not be found.".to_string(),
        ),
        _ => (
            StatusCode::BAD_GATEWAY,
            "We couldn't reach the catalog. Please try again.".to_string(),
        ),
    };

    (
        status,
        ErrorRetryTemplate {
            message,
            retry_href: retry_href.to_string(),
        },
    )
        .into_response()
}

/// Fallback for paths no route matches.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Create the full storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .nest("/categories", category_routes())
        .route("/subcategories/{id}", get(categories::subcategory))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorite_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .fallback(not_found)
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{id}", get(categories::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index))
        .route("/toggle", post(favorites::toggle))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/coupon", post(checkout::coupon))
        .route("/confirm", post(checkout::confirm))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
}
