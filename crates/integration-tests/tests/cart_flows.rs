//! Cart container flows across store restarts.

#![allow(clippy::unwrap_used)]

use souq_core::{CartLineItem, FavoriteItem, ItemId};
use souq_integration_tests::CartFixture;

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

fn favorite(id: i64) -> FavoriteItem {
    FavoriteItem {
        id: ItemId::from(id),
        name: format!("Item {id}"),
        display_price: "100 ل.س".to_string(),
        image_ref: "/img/item.jpg".to_string(),
        original_display_price: None,
        category: None,
    }
}

#[test]
fn cart_and_favorites_survive_restart() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "1,500 ل.س", 2));
    fixture.cart.add_line_item(CartLineItem {
        color: Some("red".to_string()),
        size: Some("M".to_string()),
        ..line(2, "50 ل.س", 1)
    });
    fixture.cart.toggle_favorite(favorite(9));

    let fixture = fixture.reopen();
    assert_eq!(fixture.cart.cart_count(), 3);
    assert_eq!(fixture.cart.cart_total(), 3050.0);
    assert!(fixture.cart.is_favorite(&ItemId::from(9)));

    // Merging still works against hydrated rows.
    fixture.cart.add_line_item(line(1, "1,500 ل.س", 1));
    assert_eq!(fixture.cart.line_items().len(), 2);
    assert_eq!(fixture.cart.cart_count(), 4);
}

#[test]
fn clearing_the_cart_persists_and_spares_favorites() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "100 ل.س", 5));
    fixture.cart.toggle_favorite(favorite(1));
    fixture.cart.clear_cart();

    let fixture = fixture.reopen();
    assert_eq!(fixture.cart.cart_count(), 0);
    assert!(fixture.cart.line_items().is_empty());
    assert!(fixture.cart.is_favorite(&ItemId::from(1)));
}

#[test]
fn corrupt_store_entry_heals_to_empty_cart() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(line(1, "100 ل.س", 1));

    std::fs::write(fixture.data_dir().join("cart.json"), "not json").unwrap();

    let fixture = fixture.reopen();
    assert!(fixture.cart.line_items().is_empty());
    // The corrupt entry was discarded, so a second hydration is also clean.
    let fixture = fixture.reopen();
    assert!(fixture.cart.line_items().is_empty());
}

#[test]
fn stored_json_matches_the_documented_shape() {
    let fixture = CartFixture::new();
    fixture.cart.add_line_item(CartLineItem {
        color: Some("blue".to_string()),
        ..line(7, "900 ل.س", 2)
    });

    let raw = std::fs::read_to_string(fixture.data_dir().join("cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let row = rows.first().unwrap();
    assert_eq!(row["id"], 7);
    assert_eq!(row["quantity"], 2);
    assert_eq!(row["color"], "blue");
    // Unset size is normalized to the sentinel at the mutation boundary.
    assert_eq!(row["size"], "default");
}
