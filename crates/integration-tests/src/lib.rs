//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restarting a file-backed cart store
//! - `cart_page` - Catalog payload to rendered cart page
//!
//! This library holds the fixtures the test files share.

use shopfront_core::{CartItem, CatalogProduct};

/// A catalog collection response with three products, one without a brand.
pub const CATALOG_PAGE: &str = r#"{
    "products": [
        {
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Volumizing and lengthening mascara.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "thumbnail": "https://cdn.example.com/products/1/thumbnail.png"
        },
        {
            "id": 6,
            "title": "Calvin Klein CK One",
            "description": "A classic unisex fragrance.",
            "category": "fragrances",
            "price": 49.99,
            "discountPercentage": 0.32,
            "rating": 4.85,
            "stock": 17,
            "brand": "Calvin Klein",
            "thumbnail": "https://cdn.example.com/products/6/thumbnail.png"
        },
        {
            "id": 16,
            "title": "Apple",
            "description": "Fresh and crisp apples.",
            "category": "groceries",
            "price": 1.99,
            "rating": 4.19,
            "stock": 8,
            "thumbnail": "https://cdn.example.com/products/16/thumbnail.png"
        }
    ],
    "total": 194,
    "skip": 0,
    "limit": 3
}"#;

/// Products from [`CATALOG_PAGE`].
///
/// # Panics
///
/// Panics if the fixture is not valid catalog JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog_products() -> Vec<CatalogProduct> {
    shopfront_storefront::catalog::parse_products(CATALOG_PAGE).expect("fixture parses")
}

/// Cart lines for every product in [`CATALOG_PAGE`], quantity 1 each.
#[must_use]
pub fn catalog_cart_items() -> Vec<CartItem> {
    catalog_products()
        .into_iter()
        .map(|product| product.into_cart_item(1))
        .collect()
}
