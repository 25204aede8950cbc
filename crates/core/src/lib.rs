//! Shreya Pharmacy Core - Shared types library.
//!
//! This crate provides common types used across all Shreya Pharmacy
//! components:
//! - `storefront` - Catalog, cart, persistence, and auth domain logic
//! - `cli` - Command-line storefront shell
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! async machinery. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, categories,
//!   and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
