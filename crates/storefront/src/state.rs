//! Application state wiring the storefront together.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::services::auth::AuthManager;
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};

/// Error constructing the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The data directory could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application state owning the storefront singletons.
///
/// Constructed once at startup and handed to the view layer as an
/// explicit handle. The stores are owned directly rather than shared:
/// everything runs on a single logical execution context and the view
/// needs mutable access to the cart and the session.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    content: ContentStore,
    cart: CartStore,
    auth: AuthManager,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// Opens file storage under the data directory, loads the catalog
    /// (built-in unless the configuration names a file), restores the
    /// saved cart, and restores the saved session.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Storage`] when the data directory cannot be
    /// created and [`StateError::Catalog`] when a configured catalog file
    /// does not load.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StateError> {
        let storage = Arc::new(FileStorage::open(&config.data_dir)?);
        Self::with_storage(config.clone(), storage)
    }

    /// Build the state over an explicit storage medium.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Catalog`] when a configured catalog file
    /// does not load.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, StateError> {
        let catalog = Arc::new(load_catalog(&config)?);

        let mut cart = CartStore::new(catalog.clone(), storage.clone());
        cart.load();

        let mut auth = AuthManager::demo(storage);
        auth.restore();

        Ok(Self {
            config,
            catalog,
            content: ContentStore::builtin(),
            cart,
            auth,
        })
    }

    /// In-memory state with the built-in catalog, for tests and
    /// ephemeral runs. Nothing persists across instances.
    #[must_use]
    pub fn ephemeral() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let catalog = Arc::new(Catalog::builtin());
        let cart = CartStore::new(catalog.clone(), storage.clone());
        let auth = AuthManager::demo(storage);

        Self {
            config: StorefrontConfig::default(),
            catalog,
            content: ContentStore::builtin(),
            cart,
            auth,
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the static content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get a mutable reference to the cart store.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Get a reference to the auth manager.
    #[must_use]
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Get a mutable reference to the auth manager.
    pub fn auth_mut(&mut self) -> &mut AuthManager {
        &mut self.auth
    }
}

/// Load the configured catalog, falling back to the built-in range.
fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, CatalogError> {
    let Some(path) = &config.catalog_path else {
        return Ok(Catalog::builtin());
    };

    let catalog = Catalog::from_json_file(path)?;
    tracing::info!("Loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}
