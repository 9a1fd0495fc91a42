//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One line in the cart.
///
/// Display metadata is copied from the catalog when the line is added and is
/// never refreshed afterwards. Several lines may carry the same `id`.
///
/// The serialized form uses the catalog's camelCase field names, so a stored
/// cart and a catalog product share one shape. Unknown fields are ignored on
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog identifier of the product this line was added from.
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    /// Some catalog entries (groceries, mostly) carry no brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category: String,
    /// Unit price, non-negative.
    pub price: f64,
    /// Percentage off the line's original price, in `[0, 100]`. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub quantity: u32,
}

impl CartItem {
    /// Discount percentage with the absent case resolved to zero.
    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_percentage.unwrap_or(0.0)
    }
}
