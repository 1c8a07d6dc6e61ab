//! Cart and favorite item records.
//!
//! These are the shapes serialized to the durable store, so field names are
//! part of the on-disk format. There is no versioning scheme; a shape change
//! requires clearing the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel variant value used when a line item has no explicit color or size.
///
/// Two lookups compare equal when both sides are unset, or when one side is
/// unset and the other carries this literal.
pub const DEFAULT_VARIANT: &str = "default";

/// Opaque product identifier.
///
/// The catalog API is loose about identifier types: some endpoints return
/// numeric ids, others strings. Both kinds compare and hash by value, and
/// each round-trips through JSON in its original representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl ItemId {
    /// Recover an id from its display form (e.g. an HTML form field).
    ///
    /// Form values always arrive as text; a numeric-looking value is restored
    /// to its numeric kind so it compares equal to the catalog's id.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .parse::<i64>()
            .map_or_else(|_| Self::Text(value.to_owned()), Self::Number)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

/// One row in the cart: a product variant at a quantity.
///
/// Identity for merge and lookup purposes is `(id, color, size)`; two rows
/// with the same product id but different color or size are distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ItemId,
    pub name: String,
    /// Display-formatted price string, e.g. `"1,500 ل.س"`.
    pub display_price: String,
    pub image_ref: String,
    /// Always >= 1; the cart container rejects non-positive quantities.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Pre-discount price, kept for strike-through display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_display_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CartLineItem {
    /// Whether this row matches the given identity key.
    ///
    /// Unset color/size compare as [`DEFAULT_VARIANT`] on either side.
    #[must_use]
    pub fn matches(&self, id: &ItemId, color: Option<&str>, size: Option<&str>) -> bool {
        self.id == *id
            && variant_eq(self.color.as_deref(), color)
            && variant_eq(self.size.as_deref(), size)
    }
}

/// A saved product reference, independent of cart and variant state.
///
/// Identity is `id` alone: at most one favorite per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: ItemId,
    pub name: String,
    pub display_price: String,
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_display_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn variant_eq(stored: Option<&str>, wanted: Option<&str>) -> bool {
    stored.unwrap_or(DEFAULT_VARIANT) == wanted.unwrap_or(DEFAULT_VARIANT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: ItemId, color: Option<&str>, size: Option<&str>) -> CartLineItem {
        CartLineItem {
            id,
            name: "Test".to_owned(),
            display_price: "100 ل.س".to_owned(),
            image_ref: "/img/test.jpg".to_owned(),
            quantity: 1,
            color: color.map(str::to_owned),
            size: size.map(str::to_owned),
            original_display_price: None,
            category: None,
        }
    }

    #[test]
    fn test_item_id_json_round_trip_preserves_kind() {
        let numeric: ItemId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, ItemId::Number(7));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");

        let text: ItemId = serde_json::from_str("\"sku-7\"").unwrap();
        assert_eq!(text, ItemId::Text("sku-7".to_owned()));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"sku-7\"");
    }

    #[test]
    fn test_numeric_and_text_ids_are_distinct() {
        assert_ne!(ItemId::from(7), ItemId::from("7"));
    }

    #[test]
    fn test_parse_restores_numeric_kind() {
        assert_eq!(ItemId::parse("7"), ItemId::Number(7));
        assert_eq!(ItemId::parse("sku-7"), ItemId::Text("sku-7".to_owned()));
        assert_eq!(ItemId::parse("7").to_string(), ItemId::from(7).to_string());
    }

    #[test]
    fn test_matches_treats_unset_variant_as_default() {
        let row = line(ItemId::from(1), None, None);
        assert!(row.matches(&ItemId::from(1), None, None));
        assert!(row.matches(&ItemId::from(1), Some(DEFAULT_VARIANT), Some(DEFAULT_VARIANT)));
        assert!(!row.matches(&ItemId::from(1), Some("red"), None));
    }

    #[test]
    fn test_matches_distinguishes_variants() {
        let row = line(ItemId::from(2), Some("red"), Some("M"));
        assert!(row.matches(&ItemId::from(2), Some("red"), Some("M")));
        assert!(!row.matches(&ItemId::from(2), Some("blue"), Some("M")));
        assert!(!row.matches(&ItemId::from(2), Some("red"), Some("L")));
        assert!(!row.matches(&ItemId::from(3), Some("red"), Some("M")));
    }

    #[test]
    fn test_unset_optionals_are_omitted_from_json() {
        let row = line(ItemId::from(1), None, None);
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("color"));
        assert!(!json.contains("original_display_price"));
    }
}
