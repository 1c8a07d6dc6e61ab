//! Business services for the storefront.

pub mod auth;
pub mod cart;

pub use auth::{AuthClient, AuthError};
pub use cart::CartService;
