//! Cache types for catalog API responses.

use souq_core::ItemId;

use super::types::{Category, Product, ProductDetail, SubCategory};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    SubCategories(ItemId),
    SubCategoryProducts(ItemId),
    LatestProducts,
    TopRatedProducts,
    Product(ItemId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    SubCategories(Vec<SubCategory>),
    Products(Vec<Product>),
    Product(Box<ProductDetail>),
}
