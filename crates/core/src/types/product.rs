//! Catalog product shapes.
//!
//! These mirror the REST catalog's JSON: a single product object for the
//! detail endpoint and a `{ "products": [...] }` envelope for the collection.
//! Fetching is the caller's concern; this module only describes the data and
//! the hand-off into the cart.

use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::ProductId;

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl CatalogProduct {
    /// Image to show for the product: the thumbnail, else the first gallery image.
    #[must_use]
    pub fn display_image(&self) -> &str {
        if self.thumbnail.is_empty() {
            self.images.first().map_or("", String::as_str)
        } else {
            &self.thumbnail
        }
    }

    /// Build the cart line for this product.
    ///
    /// The quantity is always explicit; the product page's "Add to cart"
    /// passes 1.
    #[must_use]
    pub fn into_cart_item(self, quantity: u32) -> CartItem {
        let thumbnail = self.display_image().to_owned();
        CartItem {
            id: self.id,
            title: self.title,
            thumbnail,
            brand: self.brand,
            category: self.category,
            price: self.price,
            discount_percentage: self.discount_percentage,
            quantity,
        }
    }
}

/// The catalog's collection envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}
