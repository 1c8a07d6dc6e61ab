//! Integration tests for Souq.
//!
//! # Test Categories
//!
//! - `cart_flows` - Cart container flows across store restarts
//! - `checkout_flows` - Coupon and order-total math end to end

#![cfg_attr(not(test), forbid(unsafe_code))]

use souq_storefront::services::CartService;
use souq_storefront::store::DurableStore;
use tempfile::TempDir;

/// A cart service backed by a throwaway data directory.
///
/// The directory lives as long as the fixture, so a test can drop and reopen
/// the service to exercise hydration.
pub struct CartFixture {
    dir: TempDir,
    pub cart: CartService,
}

impl CartFixture {
    /// Create a fixture with an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let cart = Self::open_cart(&dir);
        Self { dir, cart }
    }

    /// Drop the running service and hydrate a fresh one from the same store.
    #[must_use]
    pub fn reopen(self) -> Self {
        let dir = self.dir;
        let cart = Self::open_cart(&dir);
        Self { dir, cart }
    }

    /// Path of the backing data directory.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    fn open_cart(dir: &TempDir) -> CartService {
        let store = DurableStore::open(dir.path()).expect("open store");
        CartService::open(store)
    }
}

impl Default for CartFixture {
    fn default() -> Self {
        Self::new()
    }
}
