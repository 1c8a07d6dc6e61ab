//! Coupon and order-total math end to end.

#![allow(clippy::unwrap_used)]

use souq_core::{CartLineItem, ItemId};
use souq_integration_tests::CartFixture;
use souq_storefront::coupons;

const SHIPPING_FEE: f64 = 50_000.0;

fn line(id: i64, price: &str, quantity: u32) -> CartLineItem {
    CartLineItem {
        id: ItemId::from(id),
        name: format!("Item {id}"),
        display_price: price.to_string(),
        image_ref: "/img/item.jpg".to_string(),
        quantity,
        color: None,
        size: None,
        original_display_price: None,
        category: None,
    }
}

#[test]
fn coupon_discount_applies_to_subtotal_before_shipping() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "1,000 ل.س", 1));

    let pct = coupons::discount_for("souq20").unwrap();
    fixture.cart.apply_discount(pct);

    assert_eq!(fixture.cart.order_total(SHIPPING_FEE), 50_800.0);
}

#[test]
fn unknown_coupon_leaves_discount_untouched() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "1,000 ل.س", 1));
    fixture.cart.apply_discount(10);

    assert_eq!(coupons::discount_for("BOGUS"), None);
    // The checkout view only mutates the discount for known codes.
    assert_eq!(fixture.cart.discount_percentage(), 10);
}

#[test]
fn order_total_without_discount_is_subtotal_plus_shipping() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "250 ل.س", 2));
    assert_eq!(fixture.cart.order_total(SHIPPING_FEE), 50_500.0);
}

#[test]
fn confirming_an_order_clears_cart_and_discount() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "1,000 ل.س", 3));
    fixture.cart.apply_discount(25);

    // What the confirm handler does after recording the order.
    fixture.cart.clear_cart();

    assert_eq!(fixture.cart.cart_count(), 0);
    assert_eq!(fixture.cart.discount_percentage(), 0);
    assert_eq!(fixture.cart.order_total(SHIPPING_FEE), SHIPPING_FEE);
}

#[test]
fn unparseable_prices_do_not_poison_the_order_total() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "1,000 ل.س", 1));
    fixture.cart.add_line_item(line(2, "call for price", 4));

    assert_eq!(fixture.cart.order_total(SHIPPING_FEE), 51_000.0);
}
