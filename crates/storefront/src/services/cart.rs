//! Cart state container.
//!
//! Single owner of the cart line items, the favorites set, and the active
//! discount percentage. Page views hold no copies of this state; they read
//! through the accessors here and mutate through the operations here, so
//! there is exactly one source of truth for the whole view tree.
//!
//! Every successful mutation persists the affected collection to the durable
//! store. Persistence failure is logged and swallowed: a full disk must not
//! break an add-to-cart click. Mutations are synchronous and run under one
//! mutex, so they apply in invocation order and never interleave mid-update.

use std::sync::{Mutex, MutexGuard, PoisonError};

use souq_core::{CartLineItem, DEFAULT_VARIANT, FavoriteItem, ItemId, price_or_zero};

use crate::store::{DurableStore, store_keys};

/// The mutable cart state guarded by the container's mutex.
#[derive(Debug, Default)]
struct CartState {
    line_items: Vec<CartLineItem>,
    favorites: Vec<FavoriteItem>,
    discount_percentage: u32,
}

/// Owner of cart, favorites, and discount state for the storefront.
///
/// Constructed once at startup and shared (via `AppState`) with every
/// handler. Hydrates from the durable store on construction; the discount is
/// session-only and starts at zero.
#[derive(Debug)]
pub struct CartService {
    store: DurableStore,
    state: Mutex<CartState>,
}

impl CartService {
    /// Open the container, hydrating cart and favorites from `store`.
    #[must_use]
    pub fn open(store: DurableStore) -> Self {
        let state = CartState {
            line_items: store.load(store_keys::CART),
            favorites: store.load(store_keys::FAVORITES),
            discount_percentage: 0,
        };
        Self {
            store,
            state: Mutex::new(state),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a line item to the cart.
    ///
    /// An existing row with the same `(id, color, size)` identity absorbs the
    /// incoming quantity (repeated add-to-cart accumulates rather than
    /// duplicating rows); otherwise the item is appended with unset
    /// color/size normalized to the `"default"` sentinel. A zero quantity is
    /// ignored, like every other non-positive quantity mutation.
    pub fn add_line_item(&self, mut item: CartLineItem) {
        if item.quantity < 1 {
            return;
        }
        item.color.get_or_insert_with(|| DEFAULT_VARIANT.to_owned());
        item.size.get_or_insert_with(|| DEFAULT_VARIANT.to_owned());

        let mut state = self.lock();
        if let Some(existing) = state
            .line_items
            .iter_mut()
            .find(|row| row.matches(&item.id, item.color.as_deref(), item.size.as_deref()))
        {
            existing.quantity += item.quantity;
        } else {
            state.line_items.push(item);
        }
        self.persist_cart(&state);
    }

    /// Remove the line item matching `(id, color, size)` exactly.
    ///
    /// No-op if nothing matches.
    pub fn remove_line_item(&self, id: &ItemId, color: Option<&str>, size: Option<&str>) {
        let mut state = self.lock();
        let before = state.line_items.len();
        state.line_items.retain(|row| !row.matches(id, color, size));
        if state.line_items.len() != before {
            self.persist_cart(&state);
        }
    }

    /// Replace the quantity of the matching line item.
    ///
    /// The whole call is a no-op when `quantity < 1` (the floor invariant is
    /// enforced at this boundary, not by clamping) or when nothing matches.
    pub fn update_quantity(
        &self,
        id: &ItemId,
        color: Option<&str>,
        size: Option<&str>,
        quantity: u32,
    ) {
        if quantity < 1 {
            return;
        }
        let mut state = self.lock();
        if let Some(row) = state
            .line_items
            .iter_mut()
            .find(|row| row.matches(id, color, size))
        {
            row.quantity = quantity;
            self.persist_cart(&state);
        }
    }

    /// Empty the cart and reset the discount. Favorites are untouched.
    pub fn clear_cart(&self) {
        let mut state = self.lock();
        state.line_items.clear();
        state.discount_percentage = 0;
        self.persist_cart(&state);
    }

    /// Set the active discount percentage.
    ///
    /// No bounds validation: coupon codes are validated by the checkout view,
    /// and an out-of-range value simply produces an out-of-range total.
    pub fn apply_discount(&self, percentage: u32) {
        self.lock().discount_percentage = percentage;
    }

    /// Toggle `item` in the favorites set, keyed by id alone.
    ///
    /// Toggling twice with the same item restores the original membership.
    pub fn toggle_favorite(&self, item: FavoriteItem) {
        let mut state = self.lock();
        let before = state.favorites.len();
        state.favorites.retain(|fav| fav.id != item.id);
        if state.favorites.len() == before {
            state.favorites.push(item);
        }
        self.persist_favorites(&state);
    }

    // =========================================================================
    // Accessors and derived values
    // =========================================================================

    /// Snapshot of the cart rows, in insertion order.
    #[must_use]
    pub fn line_items(&self) -> Vec<CartLineItem> {
        self.lock().line_items.clone()
    }

    /// Snapshot of the favorites set.
    #[must_use]
    pub fn favorites(&self) -> Vec<FavoriteItem> {
        self.lock().favorites.clone()
    }

    /// Whether the favorites set contains `id`.
    #[must_use]
    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.lock().favorites.iter().any(|fav| fav.id == *id)
    }

    /// The active discount percentage.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        self.lock().discount_percentage
    }

    /// Sum of price × quantity over all rows.
    ///
    /// Rows whose display price fails to parse contribute zero.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.lock()
            .line_items
            .iter()
            .map(|row| price_or_zero(&row.display_price) * f64::from(row.quantity))
            .sum()
    }

    /// Total unit count (a row with quantity 3 counts as 3).
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.lock().line_items.iter().map(|row| row.quantity).sum()
    }

    /// Checkout total: discounted subtotal plus the flat shipping fee.
    #[must_use]
    pub fn order_total(&self, shipping_fee: f64) -> f64 {
        let state = self.lock();
        let subtotal: f64 = state
            .line_items
            .iter()
            .map(|row| price_or_zero(&row.display_price) * f64::from(row.quantity))
            .sum();
        let factor = 1.0 - f64::from(state.discount_percentage) / 100.0;
        subtotal * factor + shipping_fee
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, CartState> {
        // A poisoned lock only means a panic mid-render elsewhere; the cart
        // data itself is still consistent (mutations persist last).
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_cart(&self, state: &CartState) {
        if let Err(e) = self.store.save(store_keys::CART, &state.line_items) {
            tracing::error!(error = %e, "failed to persist cart");
        }
    }

    fn persist_favorites(&self, state: &CartState) {
        if let Err(e) = self.store.save(store_keys::FAVORITES, &state.favorites) {
            tracing::error!(error = %e, "failed to persist favorites");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn service() -> (TempDir, CartService) {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::open(dir.path()).unwrap();
        (dir, CartService::open(store))
    }

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

    fn variant_line(id: i64, color: &str, size: &str, price: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            ..line(id, price, quantity)
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
    fn test_repeated_adds_merge_into_one_row() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 1));
        cart.add_line_item(line(1, "100 ل.س", 2));

        let rows = cart.line_items();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().quantity, 3);
        assert_eq!(cart.cart_total(), 300.0);
    }

    #[test]
    fn test_different_colors_are_distinct_rows() {
        let (_dir, cart) = service();
        cart.add_line_item(variant_line(2, "red", "M", "50 ل.س", 1));
        cart.add_line_item(variant_line(2, "blue", "M", "50 ل.س", 1));

        assert_eq!(cart.line_items().len(), 2);
        assert_eq!(cart.cart_count(), 2);
    }

    #[test]
    fn test_unset_variant_matches_default_sentinel() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 1));
        cart.add_line_item(variant_line(1, "default", "default", "100 ل.س", 1));

        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.cart_count(), 2);
    }

    #[test]
    fn test_add_normalizes_unset_variants() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 1));

        let rows = cart.line_items();
        let row = rows.first().unwrap();
        assert_eq!(row.color.as_deref(), Some(DEFAULT_VARIANT));
        assert_eq!(row.size.as_deref(), Some(DEFAULT_VARIANT));
    }

    #[test]
    fn test_zero_quantity_add_is_a_no_op() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 0));
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn test_remove_then_add_produces_single_fresh_row() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 3));
        cart.remove_line_item(&ItemId::from(1), None, None);
        assert!(cart.line_items().is_empty());

        cart.add_line_item(line(1, "100 ل.س", 1));
        let rows = cart.line_items();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_requires_exact_variant_match() {
        let (_dir, cart) = service();
        cart.add_line_item(variant_line(2, "red", "M", "50 ل.س", 1));
        cart.remove_line_item(&ItemId::from(2), Some("blue"), Some("M"));
        assert_eq!(cart.line_items().len(), 1);

        cart.remove_line_item(&ItemId::from(2), Some("red"), Some("M"));
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn test_remove_missing_is_a_no_op() {
        let (_dir, cart) = service();
        cart.remove_line_item(&ItemId::from(404), None, None);
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn test_update_quantity_replaces() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 3));
        cart.update_quantity(&ItemId::from(1), None, None, 5);
        assert_eq!(cart.line_items().first().unwrap().quantity, 5);
        assert_eq!(cart.cart_total(), 500.0);
    }

    #[test]
    fn test_update_quantity_below_one_is_rejected() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 3));
        cart.update_quantity(&ItemId::from(1), None, None, 0);
        assert_eq!(cart.line_items().first().unwrap().quantity, 3);
    }

    #[test]
    fn test_clear_cart_resets_discount_and_keeps_favorites() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 2));
        cart.toggle_favorite(favorite(9));
        cart.apply_discount(20);

        cart.clear_cart();

        assert_eq!(cart.cart_count(), 0);
        assert!(cart.line_items().is_empty());
        assert_eq!(cart.discount_percentage(), 0);
        assert_eq!(cart.favorites().len(), 1);
    }

    #[test]
    fn test_toggle_favorite_is_an_involution() {
        let (_dir, cart) = service();
        cart.toggle_favorite(favorite(9));
        assert!(cart.is_favorite(&ItemId::from(9)));

        cart.toggle_favorite(favorite(9));
        assert!(!cart.is_favorite(&ItemId::from(9)));
        assert!(cart.favorites().is_empty());
    }

    #[test]
    fn test_favorites_keyed_by_id_alone() {
        let (_dir, cart) = service();
        cart.toggle_favorite(favorite(9));
        cart.toggle_favorite(FavoriteItem {
            name: "Renamed".to_string(),
            ..favorite(9)
        });
        assert!(cart.favorites().is_empty());
    }

    #[test]
    fn test_cart_total_invariant_under_add_order() {
        let (_dir, a) = service();
        a.add_line_item(line(1, "100 ل.س", 1));
        a.add_line_item(variant_line(2, "red", "M", "50 ل.س", 2));
        a.add_line_item(line(1, "100 ل.س", 2));

        let (_dir_b, b) = service();
        b.add_line_item(line(1, "100 ل.س", 2));
        b.add_line_item(line(1, "100 ل.س", 1));
        b.add_line_item(variant_line(2, "red", "M", "50 ل.س", 2));

        assert_eq!(a.cart_total(), b.cart_total());
        assert_eq!(a.cart_total(), 400.0);
    }

    #[test]
    fn test_unparseable_price_contributes_zero() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "free", 4));
        cart.add_line_item(line(2, "100 ل.س", 1));
        assert_eq!(cart.cart_total(), 100.0);
        assert_eq!(cart.cart_count(), 5);
    }

    #[test]
    fn test_order_total_applies_discount_then_shipping() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "1000 ل.س", 1));
        cart.apply_discount(20);
        assert_eq!(cart.order_total(50_000.0), 50_800.0);
    }

    #[test]
    fn test_discount_accepts_out_of_range_values() {
        let (_dir, cart) = service();
        cart.add_line_item(line(1, "100 ل.س", 1));
        cart.apply_discount(150);
        assert_eq!(cart.discount_percentage(), 150);
        assert_eq!(cart.order_total(0.0), -50.0);
    }

    #[test]
    fn test_mutations_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = DurableStore::open(dir.path()).unwrap();
            let cart = CartService::open(store);
            cart.add_line_item(line(1, "100 ل.س", 2));
            cart.toggle_favorite(favorite(9));
            cart.apply_discount(20);
        }

        let store = DurableStore::open(dir.path()).unwrap();
        let cart = CartService::open(store);
        assert_eq!(cart.cart_count(), 2);
        assert!(cart.is_favorite(&ItemId::from(9)));
        // The discount is session state, not persisted.
        assert_eq!(cart.discount_percentage(), 0);
    }
}
