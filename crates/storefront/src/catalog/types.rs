//! Catalog API response shapes.
//!
//! The catalog wraps every payload in a `{ "data": ... }` envelope. Prices
//! arrive as display-formatted strings (see `souq_core::price`), not
//! structured amounts.

use serde::Deserialize;
use souq_core::ItemId;

/// Envelope wrapping every catalog response.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// A top-level product category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A sub-category within a category.
#[derive(Debug, Clone, Deserialize)]
pub struct SubCategory {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A product as served by listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    /// Display-formatted price string, e.g. `"1,500 ل.س"`.
    pub price: String,
    pub image: String,
    /// Pre-discount display price, when the product is on sale.
    #[serde(default)]
    pub old_price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Detail payload for a single product page.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    #[serde(default)]
    pub similar_products: Vec<Product>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_envelope_deserializes() {
        let json = r#"{
            "data": [
                {"id": 1, "name": "Shirt", "price": "1,500 ل.س", "image": "/img/1.jpg",
                 "old_price": "2,000 ل.س", "colors": ["red", "blue"], "sizes": ["M"]}
            ]
        }"#;
        let envelope: DataEnvelope<Vec<Product>> = serde_json::from_str(json).unwrap();
        let product = envelope.data.first().unwrap();
        assert_eq!(product.id, ItemId::from(1));
        assert_eq!(product.colors, vec!["red", "blue"]);
        assert_eq!(product.old_price.as_deref(), Some("2,000 ل.س"));
    }

    #[test]
    fn test_detail_envelope_with_string_id() {
        let json = r#"{
            "data": {
                "product": {"id": "sku-9", "name": "Scarf", "price": "900 ل.س", "image": "/img/9.jpg"},
                "similar_products": []
            }
        }"#;
        let envelope: DataEnvelope<ProductDetail> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.product.id, ItemId::from("sku-9"));
        assert!(envelope.data.similar_products.is_empty());
        assert!(envelope.data.product.colors.is_empty());
    }
}
