//! Tillpoint Core - Shared types library.
//!
//! This crate provides the domain types used across all Tillpoint components:
//! - `widget` - The rendering-agnostic point-of-sale cart widget
//! - `cli` - Interactive terminal front end for the widget
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and ID types, payment modes, and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
