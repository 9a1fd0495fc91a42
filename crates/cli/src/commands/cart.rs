//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! shopfront cart show
//!
//! # Add a product saved from the catalog's detail endpoint
//! shopfront cart add --product product.json
//!
//! # Bump the quantity of the first line, then remove product 6 entirely
//! shopfront cart increment 0
//! shopfront cart remove 6
//! ```
//!
//! Every command loads the cart from storage, applies one action through the
//! cart view, and prints the resulting page.

use std::io::Write;

use shopfront_core::{CurrencyCode, ProductId};
use shopfront_storefront::cart::QuantityChange;
use shopfront_storefront::storage::KeyValueStore;
use shopfront_storefront::{AppError, CartStore, CartView, catalog};
use thiserror::Error;

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Print the cart as text.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn show<S: KeyValueStore>(
    store: &mut CartStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let page = CartView::new(store).with_currency(currency).page();
    out.write_all(page.to_text().as_bytes())?;
    Ok(())
}

/// Print the cart page as HTML.
///
/// # Errors
///
/// Returns an error if the page fails to render or output cannot be written.
pub fn render<S: KeyValueStore>(
    store: &mut CartStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let page = CartView::new(store).with_currency(currency).page();
    let html = page.render_html().map_err(AppError::from)?;
    writeln!(out, "{html}")?;
    Ok(())
}

/// Add every product in a catalog payload to the cart.
///
/// # Errors
///
/// Returns an error if the payload is not catalog JSON or the quantity is zero.
pub fn add<S: KeyValueStore>(
    store: &mut CartStore<S>,
    payload: &str,
    quantity: u32,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let items = catalog::cart_items_from_json(payload, quantity)?;
    for item in items {
        tracing::info!(product_id = %item.id, title = %item.title, "adding to cart");
        store.add_to_cart(item);
    }
    show(store, currency, out)
}

/// Remove every line for a product.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn remove<S: KeyValueStore>(
    store: &mut CartStore<S>,
    id: ProductId,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    CartView::new(store).remove(id);
    show(store, currency, out)
}

/// Change the quantity of the line at `line` by `change`.
///
/// A change that would take the quantity to zero is ignored, as on the cart
/// page; the line must be removed instead.
///
/// # Errors
///
/// Returns `AppError::NotFound` if there is no such line.
pub fn adjust<S: KeyValueStore>(
    store: &mut CartStore<S>,
    line: usize,
    change: i64,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match CartView::new(store).adjust(line, change) {
        QuantityChange::Updated { id, quantity } => {
            tracing::info!(product_id = %id, quantity, "quantity updated");
        }
        QuantityChange::Refused => {
            tracing::info!(line, "quantity already at minimum, use `cart remove` instead");
        }
        QuantityChange::NoSuchLine => {
            return Err(AppError::NotFound(format!("cart line {line}")).into());
        }
    }
    show(store, currency, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Io` if output cannot be written.
pub fn clear<S: KeyValueStore>(
    store: &mut CartStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    CartView::new(store).clear();
    show(store, currency, out)
}
