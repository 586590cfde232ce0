//! In-memory cart store.
//!
//! The cart is an ordered list of line items: insertion order is first-add
//! order and survives removals. There is at most one line per product;
//! repeated adds increment the quantity, capped by the product's stock.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tillpoint_core::{Product, ProductId};

/// One cart entry. The price is snapshotted when the line is created, so a
/// later catalog price change never retroactively reprices the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// What a [`CartStore::add`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended; this is the product's first add, which is
    /// what triggers the suggestion fetch upstream.
    Added,
    /// An existing line's quantity was incremented.
    Incremented,
}

/// Rejected mutation: the requested quantity would exceed available stock.
///
/// The mutation is all-or-nothing; on rejection the cart is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot add more {name}: only {stock_quantity} units in stock")]
pub struct StockError {
    pub name: String,
    pub stock_quantity: i64,
}

/// The buyer's pending selection, held only in memory for the session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Current lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of `product`.
    ///
    /// If the product already has a line, its quantity is incremented, but
    /// only while the resulting quantity stays within `stock_quantity`.
    /// Otherwise a new line is appended with quantity 1 and the price
    /// snapshotted from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StockError`] when the resulting quantity would exceed the
    /// product's stock; the cart is left unchanged.
    pub fn add(&mut self, product: &Product) -> Result<AddOutcome, StockError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            if i64::from(line.quantity) + 1 > product.stock_quantity {
                return Err(StockError {
                    name: product.name.clone(),
                    stock_quantity: product.stock_quantity,
                });
            }
            line.quantity += 1;
            return Ok(AddOutcome::Incremented);
        }

        if product.stock_quantity < 1 {
            return Err(StockError {
                name: product.name.clone(),
                stock_quantity: product.stock_quantity,
            });
        }

        self.lines.push(CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.selling_price,
            quantity: 1,
        });
        Ok(AddOutcome::Added)
    }

    /// Remove the line at `index`, returning it.
    ///
    /// The UI only ever issues indices it just rendered, but an out-of-range
    /// index must not corrupt the list: it is a no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The amount to charge. No tax or discount model applies here, so the
    /// total equals the subtotal; it is always recomputed from the lines,
    /// never read back from a rendered view.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }
}
