//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHREYA_DATA_DIR` - Directory for persisted state (default: `.shreya-pharmacy`)
//! - `SHREYA_CATALOG` - Path to a catalog JSON file (default: built-in catalog)

use std::path::PathBuf;

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = ".shreya-pharmacy";

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart and session slots.
    pub data_dir: PathBuf,
    /// Catalog file to load instead of the built-in range.
    pub catalog_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    /// Every variable is optional, so loading never fails.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            data_dir: PathBuf::from(get_env_or_default("SHREYA_DATA_DIR", DEFAULT_DATA_DIR)),
            catalog_path: get_optional_env("SHREYA_CATALOG").map(PathBuf::from),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
