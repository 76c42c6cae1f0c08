//! Redcart Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing it
//! to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`storage`] - Named-key JSON persistence (file directory or memory)
//! - [`store`] - Cart, wishlist and settings stores: pure reducers hosted in a
//!   publish/subscribe container, persisted by a subscriber
//! - [`catalog`] - Product query pipeline (filter, sort, paginate) and browse
//!   session state
//! - [`dummyjson`] - Catalog API client with response caching
//! - [`routes`] - JSON HTTP surface over all of the above

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod dummyjson;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
