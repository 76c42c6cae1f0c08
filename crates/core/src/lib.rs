//! Redcart Core - Shared types library.
//!
//! This crate provides the domain types used across all Redcart components:
//! - `storefront` - Stores, catalog query pipeline and the JSON HTTP surface
//! - `cli` - Command-line client for browsing the catalog and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! persistence, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and cart data, type-safe IDs, shipping policy,
//!   account form validation and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
