//! Tillpoint cart widget library.
//!
//! A rendering-agnostic shopping-cart widget for a point-of-sale screen. The
//! widget owns the catalog filter, the in-memory cart store, and the HTTP
//! clients for checkout and "bought together" suggestions; the host UI
//! supplies a [`view::WidgetView`] implementation and forwards user events to
//! [`widget::CartWidget`].
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product catalog with substring filtering
//! - [`store`] - Ordered cart line store with stock-capped mutation
//! - [`view`] - View models, projections, and the `WidgetView` trait
//! - [`client`] - Backend HTTP client (checkout and suggestions)
//! - [`config`] - Environment-driven configuration
//! - [`widget`] - The event-driven controller tying it all together
//!
//! Control flow is event-driven: user input mutates the store, the view is
//! re-rendered synchronously, and only then are any network requests issued.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod client;
pub mod config;
pub mod store;
pub mod view;
pub mod widget;

pub use catalog::Catalog;
pub use client::{BackendClient, BackendError, SaleId, SaleReceipt, SaleRequest, Suggestion};
pub use config::{ConfigError, WidgetConfig};
pub use store::{AddOutcome, CartLine, CartStore, StockError};
pub use view::{Availability, CartPanel, CartRow, ProductCard, SuggestionPrompt, WidgetView};
pub use widget::CartWidget;
