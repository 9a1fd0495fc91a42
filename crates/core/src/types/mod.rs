//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for cart and catalog concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartItem;
pub use id::*;
pub use price::{CurrencyCode, format_amount};
pub use product::{CatalogProduct, ProductList};
