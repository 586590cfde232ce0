//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Stock counts strictly below this (but above zero) get a low-stock badge.
/// Purely cosmetic; it never blocks an add.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A purchasable product as supplied by the backend catalog.
///
/// Read-only from the widget's perspective: the widget never mutates stock,
/// it only checks it when incrementing cart quantities. The backend sends
/// prices as JSON floats; unknown fields (purchase price, minimum stock
/// level, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Category is optional; uncategorized products display as "General".
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    pub stock_quantity: i64,
}

impl Product {
    /// Whether the product can be added to a cart at all.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether the product is running low (available, but below the badge
    /// threshold).
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.is_available() && self.stock_quantity < LOW_STOCK_THRESHOLD
    }
}
