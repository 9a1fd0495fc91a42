//! Reading catalog payloads into cart lines.
//!
//! The catalog serves either a single product (detail endpoint) or a
//! `{ "products": [...] }` envelope (collection endpoint). Both shapes are
//! accepted wherever products are handed to the cart.

use serde::Deserialize;
use shopfront_core::{CartItem, CatalogProduct, ProductList};

use crate::error::{AppError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    List(ProductList),
    Single(Box<CatalogProduct>),
}

/// Parse a catalog payload into the products it contains.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the JSON matches neither shape.
pub fn parse_products(json: &str) -> Result<Vec<CatalogProduct>> {
    let payload: CatalogPayload = serde_json::from_str(json)?;
    Ok(match payload {
        CatalogPayload::List(list) => list.products,
        CatalogPayload::Single(product) => vec![*product],
    })
}

/// Parse a catalog payload into cart lines with an explicit quantity.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a zero quantity, or
/// `AppError::Catalog` if the payload cannot be parsed.
pub fn cart_items_from_json(json: &str, quantity: u32) -> Result<Vec<CartItem>> {
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(parse_products(json)?
        .into_iter()
        .map(|product| product.into_cart_item(quantity))
        .collect())
}
