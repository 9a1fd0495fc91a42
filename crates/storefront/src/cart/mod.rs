//! Cart subsystem.
//!
//! - [`store`] - the single owner of cart contents and their persistence
//! - [`view`] - the cart page and its controls

pub mod store;
pub mod view;

pub use store::{CART_STORAGE_KEY, CartStore, SubscriptionId};
pub use view::{CartPage, CartView, QuantityChange};
