//! Shreya Pharmacy storefront library.
//!
//! This crate provides the storefront core as a library: the product
//! catalog, the shopping cart with write-through persistence, and the
//! demo account service. The CLI and the integration tests both build
//! on it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod content;
pub mod services;
pub mod state;
pub mod storage;
