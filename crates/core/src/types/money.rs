//! Money formatting for display.
//!
//! All amounts are [`rust_decimal::Decimal`] internally. The backend speaks
//! plain JSON floats, so wire types serialize amounts with
//! `rust_decimal::serde::float`; this module only covers human-facing
//! formatting.

use rust_decimal::Decimal;

/// Format an amount for display: currency symbol followed by the value
/// rounded to two decimal places (e.g., `₹19.99`).
#[must_use]
pub fn display_amount(amount: Decimal, symbol: &str) -> String {
    format!("{symbol}{:.2}", amount.round_dp(2))
}
