//! Cart pricing.
//!
//! All arithmetic is plain `f64` with no rounding between steps. Tax and
//! delivery are flat per-order fees: they are added once to the cart total
//! and never allocated to individual lines.

use crate::types::CartItem;

/// Flat tax (GST) charged once per order.
pub const TAX_PRICE: f64 = 20.0;

/// Flat delivery charge applied once per order.
pub const DELIVERY_CHARGE: f64 = 40.0;

/// Totals for a single cart line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineTotal {
    /// `price * quantity`.
    pub original: f64,
    /// Amount taken off `original` by the line's discount percentage.
    pub discount: f64,
    /// `original - discount`.
    pub total: f64,
}

/// Aggregate figures for the order summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderSummary {
    pub total_original: f64,
    pub total_discount: f64,
    pub tax: f64,
    pub delivery: f64,
    /// Sum of line totals plus tax and delivery.
    pub grand_total: f64,
}

/// Compute the totals for one line.
#[must_use]
pub fn line_total(item: &CartItem) -> LineTotal {
    let original = item.price * f64::from(item.quantity);
    let discount = original * item.discount_rate() / 100.0;
    LineTotal {
        original,
        discount,
        total: original - discount,
    }
}

/// Sum of every line total plus the per-order tax and delivery fees.
///
/// ```
/// use shopfront_core::{CartItem, ProductId, pricing};
///
/// let item = CartItem {
///     id: ProductId::new(1),
///     title: "Mascara".into(),
///     thumbnail: String::new(),
///     brand: None,
///     category: "beauty".into(),
///     price: 100.0,
///     discount_percentage: Some(10.0),
///     quantity: 2,
/// };
///
/// assert!((pricing::cart_total(&[item]) - 240.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cart_total(items: &[CartItem]) -> f64 {
    let lines: f64 = items.iter().map(|item| line_total(item).total).sum();
    lines + TAX_PRICE + DELIVERY_CHARGE
}

/// Compute the order summary for a cart.
#[must_use]
pub fn aggregate(items: &[CartItem]) -> OrderSummary {
    let (total_original, total_discount) =
        items
            .iter()
            .map(line_total)
            .fold((0.0, 0.0), |(original, discount), line| {
                (original + line.original, discount + line.discount)
            });

    OrderSummary {
        total_original,
        total_discount,
        tax: TAX_PRICE,
        delivery: DELIVERY_CHARGE,
        grand_total: cart_total(items),
    }
}
