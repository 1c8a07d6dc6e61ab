//! Core types for Souq.
//!
//! This module provides the entity records shared between the cart state
//! container and the page views.

pub mod item;
pub mod price;

pub use item::{CartLineItem, DEFAULT_VARIANT, FavoriteItem, ItemId};
pub use price::{parse_display_price, price_or_zero};
