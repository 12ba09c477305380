//! Footwa Storefront - application library.
//!
//! Everything the shop does that is not presentation lives here:
//!
//! - [`catalog`] - remote catalog client (two shoe categories, fetched
//!   concurrently at startup)
//! - [`filter`] - pure search/category filtering over the loaded catalog
//! - [`overrides`] - admin-supplied price/image/link overlays
//! - [`orders`] - checkout validation and the order lifecycle
//!   (active -> archived/deleted, customer records)
//! - [`reviews`] - append-only per-product reviews
//! - [`export`] - the order-history/marketing export document
//! - [`store`] - embedded redb storage behind repository types
//! - [`session`] - the explicit application-state machine the front-end
//!   drives
//!
//! The front-end (the `footwa` binary) renders state and collects input; it
//! never touches storage or the network directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod orders;
pub mod overrides;
pub mod reviews;
pub mod session;
pub mod store;

pub use error::{AppError, Result};
