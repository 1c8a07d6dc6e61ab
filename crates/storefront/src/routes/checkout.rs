//! Checkout route handlers.
//!
//! The checkout view owns coupon validation (against the hard-coded table in
//! [`crate::coupons`]) and records the chosen payment method as a plain
//! string. Payment execution is out of scope; confirming an order clears the
//! cart and shows an order reference.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::coupons;
use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Payment methods offered at checkout. Selection is recorded, not executed.
const PAYMENT_METHODS: &[&str] = &["Cash on delivery", "Bank transfer", "Card on pickup"];

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub discount: u32,
    pub shipping_fee: f64,
    pub order_total: f64,
    pub coupon_error: Option<String>,
    pub payment_methods: &'static [&'static str],
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CheckoutCompleteTemplate {
    pub order_ref: String,
    pub payment_method: String,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

/// Order confirmation form data.
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub payment_method: String,
}

fn checkout_page(state: &AppState, coupon_error: Option<String>) -> CheckoutTemplate {
    CheckoutTemplate {
        cart: CartView::snapshot(state),
        discount: state.cart().discount_percentage(),
        shipping_fee: state.config().shipping_fee,
        order_total: state.cart().order_total(state.config().shipping_fee),
        coupon_error,
        payment_methods: PAYMENT_METHODS,
    }
}

/// Display the checkout summary.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    if state.cart().cart_count() == 0 {
        return Redirect::to("/cart").into_response();
    }
    checkout_page(&state, None).into_response()
}

/// Apply a coupon code.
///
/// A known code updates the cart's discount percentage; an unknown one
/// renders a message and leaves the discount untouched.
#[instrument(skip(state))]
pub async fn coupon(State(state): State<AppState>, Form(form): Form<CouponForm>) -> Response {
    match coupons::discount_for(&form.code) {
        Some(percentage) => {
            state.cart().apply_discount(percentage);
            checkout_page(&state, None).into_response()
        }
        None => checkout_page(&state, Some("Unknown coupon code".to_string())).into_response(),
    }
}

/// Confirm the order: record the payment method, clear the cart, and show an
/// order reference.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>, Form(form): Form<ConfirmForm>) -> Response {
    if state.cart().cart_count() == 0 {
        return Redirect::to("/cart").into_response();
    }

    let order_ref = Uuid::new_v4().to_string();
    tracing::info!(
        order_ref,
        payment_method = form.payment_method,
        total = state.cart().order_total(state.config().shipping_fee),
        "order confirmed"
    );

    state.cart().clear_cart();

    CheckoutCompleteTemplate {
        order_ref,
        payment_method: form.payment_method,
    }
    .into_response()
}
