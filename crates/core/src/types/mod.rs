//! Core types for Tillpoint.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod payment;
pub mod product;

pub use id::ProductId;
pub use money::display_amount;
pub use payment::{ParsePaymentModeError, PaymentMode};
pub use product::{LOW_STOCK_THRESHOLD, Product};
