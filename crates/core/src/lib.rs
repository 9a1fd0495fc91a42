//! Shopfront Core - Cart types and pricing.
//!
//! This crate provides the types shared by every Shopfront component:
//! - `storefront` - Cart store, durable storage and the cart view
//! - `cli` - Command-line harness for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Everything here is deterministic given its inputs.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, cart line items, catalog products, money formatting
//! - [`pricing`] - Per-line and per-order totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod types;

pub use pricing::{DELIVERY_CHARGE, LineTotal, OrderSummary, TAX_PRICE};
pub use types::*;
