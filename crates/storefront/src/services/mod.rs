//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Session management over a pluggable identity provider

pub mod auth;
