//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::services::{AuthClient, CartService};
use crate::store::{DurableStore, StoreError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart service inside is the single owner
/// of cart/favorite/discount state; handlers go through it rather than
/// keeping copies.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    auth: AuthClient,
    cart: CartService,
}

impl AppState {
    /// Create a new application state, opening the durable store and
    /// hydrating the cart from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store = DurableStore::open(&config.data_dir)?;
        let cart = CartService::open(store);
        let catalog = CatalogClient::new(config.catalog_base_url.clone());
        let auth = AuthClient::new(config.auth_base_url.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the auth service client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Get a reference to the cart state container.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }
}
