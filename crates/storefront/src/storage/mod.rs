//! Key-value persistence for cart and session state.
//!
//! The storefront persists small JSON snapshots under well-known keys,
//! the way the browser build kept them in local storage. [`Storage`] is
//! the seam: [`FileStorage`] backs normal runs with one file per key,
//! [`MemoryStorage`] backs tests and ephemeral sessions.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Key for the serialized cart lines.
    pub const CART: &str = "pharma_cart";

    /// Key for the signed-in demo user.
    pub const USER: &str = "demo_user";
}

/// Errors raised by a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be opened.
    #[error("storage at {path} unavailable: {source}")]
    Unavailable {
        /// Location of the backing store.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A read or write against a key failed.
    #[error("storage I/O error on {key:?}: {source}")]
    Io {
        /// Key the operation was addressing.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A flat string key-value store with last-write-wins semantics.
///
/// Values are opaque strings (the callers store JSON) and keys are the
/// flat identifiers from [`keys`]. Reading an absent key is `None`, and
/// removing an absent key is not an error.
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the removal fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
