//! Souq Core - Shared types library.
//!
//! This crate provides common types used across all Souq components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - Cross-crate flow tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Item identities, cart/favorite records, and display-price
//!   parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
