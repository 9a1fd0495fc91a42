//! Cart page: display model, templates and the page's controls.
//!
//! The view never owns cart state. It reads the current snapshot from a
//! [`CartStore`] each time it builds a page and forwards user actions to the
//! store's mutators.

use std::fmt::Write as _;

use askama::Template;
use shopfront_core::{CartItem, CurrencyCode, OrderSummary, ProductId, format_amount, pricing};

use super::store::CartStore;
use crate::storage::KeyValueStore;

/// Where "Continue Shopping" leads.
pub const CATALOG_HREF: &str = "/product";

/// Checkout is a placeholder with nothing behind it.
pub const CHECKOUT_HREF: &str = "#";

/// One cart line prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Position in the cart; identifies the line the controls act on.
    pub index: usize,
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Order summary figures, each rounded independently for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub original: String,
    pub savings: String,
    pub tax: String,
    pub delivery: String,
    pub total: String,
}

/// A non-empty cart prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledCart {
    pub lines: Vec<CartLineView>,
    pub summary: SummaryView,
}

/// What the cart page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPage {
    /// Nothing in the cart; totals are not computed.
    Empty,
    Filled(FilledCart),
}

impl CartPage {
    /// Build the page for a cart snapshot.
    #[must_use]
    pub fn build(items: &[CartItem], currency: CurrencyCode) -> Self {
        if items.is_empty() {
            return Self::Empty;
        }

        let lines = items
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                index,
                id: item.id,
                title: item.title.clone(),
                thumbnail: item.thumbnail.clone(),
                quantity: item.quantity,
                price: format!("{}{}", currency.symbol(), item.price),
                line_total: format_amount(pricing::line_total(item).total, currency),
            })
            .collect();

        Self::Filled(FilledCart {
            lines,
            summary: SummaryView::new(&pricing::aggregate(items), currency),
        })
    }

    /// Render the page as HTML.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if template rendering fails.
    pub fn render_html(&self) -> askama::Result<String> {
        match self {
            Self::Empty => CartEmptyTemplate {
                catalog_href: CATALOG_HREF,
            }
            .render(),
            Self::Filled(cart) => CartShowTemplate {
                cart,
                catalog_href: CATALOG_HREF,
                checkout_href: CHECKOUT_HREF,
            }
            .render(),
        }
    }

    /// Render the page as plain text for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Empty => {
                out.push_str("Oops, there's no item in the cart\n");
                let _ = writeln!(out, "Continue Shopping: {CATALOG_HREF}");
            }
            Self::Filled(cart) => {
                out.push_str("Shopping Cart\n");
                for line in &cart.lines {
                    let _ = writeln!(
                        out,
                        "  [{}] #{} {} x{} @ {} = {}",
                        line.index, line.id, line.title, line.quantity, line.price, line.line_total
                    );
                }
                let s = &cart.summary;
                out.push_str("Order summary\n");
                let _ = writeln!(out, "  {:<16} {}", "Original price", s.original);
                let _ = writeln!(out, "  {:<16} -{}", "Savings", s.savings);
                let _ = writeln!(out, "  {:<16} {}", "GST", s.tax);
                let _ = writeln!(out, "  {:<16} {}", "Delivery charge", s.delivery);
                let _ = writeln!(out, "  {:<16} {}", "Total", s.total);
            }
        }
        out
    }
}

impl SummaryView {
    fn new(summary: &OrderSummary, currency: CurrencyCode) -> Self {
        Self {
            original: format_amount(summary.total_original, currency),
            savings: format_amount(summary.total_discount, currency),
            tax: format_amount(summary.tax, currency),
            delivery: format_amount(summary.delivery, currency),
            total: format_amount(summary.grand_total, currency),
        }
    }
}

/// Cart page template.
#[derive(Template)]
#[template(path = "cart/show.html")]
struct CartShowTemplate<'a> {
    cart: &'a FilledCart,
    catalog_href: &'a str,
    checkout_href: &'a str,
}

/// Empty cart template.
#[derive(Template)]
#[template(path = "cart/empty.html")]
struct CartEmptyTemplate<'a> {
    catalog_href: &'a str,
}

/// Outcome of a quantity control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The store was asked to set `quantity` on every line with `id`.
    Updated { id: ProductId, quantity: u32 },
    /// The change would leave the line at zero or below; nothing was sent.
    Refused,
    /// No line at that position.
    NoSuchLine,
}

/// The cart page's controls, bound to a store.
pub struct CartView<'a, S> {
    store: &'a mut CartStore<S>,
    currency: CurrencyCode,
}

impl<'a, S: KeyValueStore> CartView<'a, S> {
    #[must_use]
    pub fn new(store: &'a mut CartStore<S>) -> Self {
        Self {
            store,
            currency: CurrencyCode::default(),
        }
    }

    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Current page for the store's cart.
    #[must_use]
    pub fn page(&self) -> CartPage {
        CartPage::build(self.store.items(), self.currency)
    }

    /// "+" on the line at `line`.
    pub fn increment(&mut self, line: usize) -> QuantityChange {
        self.adjust(line, 1)
    }

    /// "−" on the line at `line`. Refused at quantity 1; use remove instead.
    pub fn decrement(&mut self, line: usize) -> QuantityChange {
        self.adjust(line, -1)
    }

    /// Apply `change` to the quantity shown on the line at `line`.
    ///
    /// The new quantity is derived from that line's own quantity and then
    /// written to every line sharing its id.
    pub fn adjust(&mut self, line: usize, change: i64) -> QuantityChange {
        let Some(item) = self.store.get(line) else {
            return QuantityChange::NoSuchLine;
        };
        let id = item.id;

        let new_quantity = i64::from(item.quantity) + change;
        match u32::try_from(new_quantity) {
            Ok(quantity) if quantity > 0 => {
                self.store.update_cart(id, quantity);
                QuantityChange::Updated { id, quantity }
            }
            _ => {
                tracing::debug!(product_id = %id, new_quantity, "quantity change refused");
                QuantityChange::Refused
            }
        }
    }

    /// "Remove" on a line: drops every line with that product id.
    pub fn remove(&mut self, id: ProductId) {
        self.store.remove_item(id);
    }

    /// "Clear Cart". No confirmation.
    pub fn clear(&mut self) {
        self.store.clear_cart();
    }
}
