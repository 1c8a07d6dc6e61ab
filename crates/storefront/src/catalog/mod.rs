//! Product catalog API client.
//!
//! The catalog is an opaque HTTP collaborator: JSON over GET, everything
//! wrapped in a `{ "data": ... }` envelope. Category, sub-category, and
//! product responses are cached with `moka` (5-minute TTL); the random
//! product feed bypasses the cache so it stays random.
//!
//! Failure policy: errors surface as [`CatalogError`] and the page views
//! render an inline error with a manual retry link. No automatic retry, no
//! backoff.

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use souq_core::ItemId;
use thiserror::Error;
use tracing::{debug, instrument};

use cache::{CacheKey, CacheValue};
use types::DataEnvelope;
pub use types::{Category, Product, ProductDetail, SubCategory};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("catalog returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                cache,
            }),
        }
    }

    /// List top-level categories.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(cached)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("categories served from cache");
            return Ok(cached);
        }
        let categories: Vec<Category> = self.get_json("categories").await?;
        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// List the sub-categories of a category.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn subcategories(&self, category_id: &ItemId) -> Result<Vec<SubCategory>, CatalogError> {
        let key = CacheKey::SubCategories(category_id.clone());
        if let Some(CacheValue::SubCategories(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached);
        }
        let subcategories: Vec<SubCategory> = self
            .get_json(&format!("categories/{category_id}/subcategories"))
            .await?;
        self.inner
            .cache
            .insert(key, CacheValue::SubCategories(subcategories.clone()))
            .await;
        Ok(subcategories)
    }

    /// List the products of a sub-category.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn subcategory_products(
        &self,
        subcategory_id: &ItemId,
    ) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::SubCategoryProducts(subcategory_id.clone());
        if let Some(CacheValue::Products(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached);
        }
        let products: Vec<Product> = self
            .get_json(&format!("subcategories/{subcategory_id}/products"))
            .await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// The latest products feed.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn latest_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.cached_product_feed(CacheKey::LatestProducts, "products/latest")
            .await
    }

    /// The top-rated products feed.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn top_rated_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.cached_product_feed(CacheKey::TopRatedProducts, "products/top-rated")
            .await
    }

    /// A random selection of products. Never cached.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or parse failure.
    #[instrument(skip(self))]
    pub async fn random_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("products/random").await
    }

    /// Fetch a single product with its similar-products list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, and the usual
    /// transport/status/parse failures otherwise.
    #[instrument(skip(self))]
    pub async fn product(&self, id: &ItemId) -> Result<ProductDetail, CatalogError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(cached)) = self.inner.cache.get(&key).await {
            return Ok(*cached);
        }
        let detail: ProductDetail = self.get_json(&format!("products/{id}")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(detail.clone())))
            .await;
        Ok(detail)
    }

    async fn cached_product_feed(
        &self,
        key: CacheKey,
        path: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached);
        }
        let products: Vec<Product> = self.get_json(path).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Execute a GET and unwrap the `{ "data": ... }` envelope.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics.
        let response_text = response.text().await?;
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let envelope: DataEnvelope<T> = serde_json::from_str(&response_text)?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("products/404".to_string());
        assert_eq!(err.to_string(), "Not found: products/404");

        let err = CatalogError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "catalog returned status 502 Bad Gateway");
    }
}
