//! Integration tests for the Shreya Pharmacy storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shreya-pharmacy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round-trips through on-disk storage
//! - `auth_sessions` - Session save, restore, and sign-out
//! - `storefront_state` - Full application wiring over a data directory
//!
//! Every test works in its own temporary data directory. Nothing here
//! needs a server, a database, or the network.
