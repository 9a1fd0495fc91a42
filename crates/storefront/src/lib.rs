//! Shopfront Storefront library.
//!
//! The cart subsystem of the storefront: the cart store and its durable
//! storage, the cart page, and the configuration and tracing setup shared
//! by the binaries.
//!
//! # Modules
//!
//! - [`cart`] - Cart store (state, persistence, observers) and cart view
//! - [`storage`] - Key-value storage backends
//! - [`catalog`] - Turning catalog payloads into cart lines
//! - [`config`] - Environment configuration
//! - [`telemetry`] - Tracing subscriber setup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

pub use cart::{CartPage, CartStore, CartView, QuantityChange};
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
