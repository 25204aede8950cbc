//! Shopping cart with write-through persistence.
//!
//! The cart is the one mutable piece of session state. Every mutation
//! persists the full line list into the cart storage slot and then tells
//! subscribers to re-read; rendering layers never receive a payload, they
//! query the store again. Persistence is best-effort: when the medium is
//! unavailable the in-memory cart keeps working and the failure is logged.
//!
//! All operations run to completion on a single logical execution context,
//! so the store carries no locking of its own and is not meant to be
//! shared across threads.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shreya_pharmacy_core::{Price, ProductId};

use crate::catalog::{Catalog, Product};
use crate::storage::{Storage, StorageError, keys};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by cart operations.
///
/// None of these are fatal. `ProductNotFound` is the only one callers are
/// expected to branch on; the persistence variants exist so tests and logs
/// can tell a corrupt slot from an unreachable medium.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The referenced product id is not in the catalog.
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// Persisted cart data exists but cannot be restored.
    #[error("persisted cart is corrupt: {0}")]
    PersistenceCorrupt(String),

    /// The storage medium rejected a read or write.
    #[error("cart storage unavailable")]
    PersistenceUnavailable(#[from] StorageError),
}

// =============================================================================
// Cart lines
// =============================================================================

/// One cart entry: a product snapshot plus a quantity.
///
/// The product fields are copied at add time. If the catalog changed
/// afterwards the line would not follow; totals and rendering read only
/// the line's own fields. Serialized flat, so a persisted line looks like
/// a product record with an extra `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity, exact.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.quantity
    }
}

// =============================================================================
// Cart store
// =============================================================================

type Subscriber = Box<dyn Fn(&CartStore)>;

/// Mutable cart state with write-through persistence and change
/// notifications.
///
/// At most one line exists per product id. Lines keep insertion order;
/// repeated adds merge into the existing line.
pub struct CartStore {
    lines: Vec<CartLine>,
    catalog: Arc<Catalog>,
    storage: Arc<dyn Storage>,
    subscribers: Vec<Subscriber>,
}

impl CartStore {
    /// Create an empty cart backed by the given catalog and storage.
    ///
    /// Call [`CartStore::load`] afterwards to restore a persisted session.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, storage: Arc<dyn Storage>) -> Self {
        Self {
            lines: Vec::new(),
            catalog,
            storage,
            subscribers: Vec::new(),
        }
    }

    // ===== Mutations =====

    /// Add one unit of the given product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the id is not in the
    /// catalog; the cart is left untouched and nothing is persisted.
    pub fn add(&mut self, id: ProductId) -> Result<(), CartError> {
        self.add_with_quantity(id, 1)
    }

    /// Add `quantity` units of the given product, merging into an existing
    /// line when one is present. Quantities below 1 are treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the id is not in the
    /// catalog; the cart is left untouched and nothing is persisted.
    pub fn add_with_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        let product = self
            .catalog
            .find_by_id(id)
            .ok_or(CartError::ProductNotFound(id))?;
        let quantity = quantity.max(1);

        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == id) {
            line.quantity += quantity;
        } else {
            let product = product.clone();
            self.lines.push(CartLine { product, quantity });
        }

        self.changed();
        Ok(())
    }

    /// Remove the line for the given product, if any.
    ///
    /// An absent id is an idempotent no-op, but the cart still persists
    /// and notifies, mirroring the original storefront.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        let removed = self.lines.len() != before;

        self.changed();
        removed
    }

    /// Set the quantity on the line for the given product.
    ///
    /// Quantities below 1 are clamped to 1, never rejected. There is no
    /// upper cap here; input surfaces enforce their own. An absent id is
    /// a no-op that neither persists nor notifies.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        let Some(line) = self.lines.iter_mut().find(|line| line.product.id == id) else {
            return false;
        };

        line.quantity = quantity.max(1);
        self.changed();
        true
    }

    // ===== Reads =====

    /// Cart total: the exact sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // ===== Persistence =====

    /// Read and validate the persisted cart without touching state.
    ///
    /// `Ok(None)` means no cart has been saved.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::PersistenceCorrupt`] when the slot holds
    /// unparsable JSON, a duplicate product id, or a zero quantity, and
    /// [`CartError::PersistenceUnavailable`] when the medium cannot be
    /// read.
    pub fn read_persisted(&self) -> Result<Option<Vec<CartLine>>, CartError> {
        let Some(raw) = self.storage.get(keys::CART)? else {
            return Ok(None);
        };

        let lines: Vec<CartLine> = serde_json::from_str(&raw)
            .map_err(|err| CartError::PersistenceCorrupt(err.to_string()))?;

        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(CartError::PersistenceCorrupt(format!(
                    "line for product {} has zero quantity",
                    line.product.id
                )));
            }
            if !seen.insert(line.product.id) {
                return Err(CartError::PersistenceCorrupt(format!(
                    "duplicate line for product {}",
                    line.product.id
                )));
            }
        }

        Ok(Some(lines))
    }

    /// Restore the cart from storage.
    ///
    /// A missing slot leaves the cart as it is. A slot that cannot be
    /// restored resets the cart to empty and logs a warning; the failure
    /// never reaches the caller. A successful restore replaces the lines
    /// wholesale and notifies subscribers.
    pub fn load(&mut self) {
        match self.read_persisted() {
            Ok(Some(lines)) => {
                self.lines = lines;
                self.notify();
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Could not restore persisted cart, starting empty: {err}");
                self.lines.clear();
            }
        }
    }

    /// Serialize the current lines into the cart storage slot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::PersistenceUnavailable`] when the medium
    /// rejects the write.
    pub fn save(&self) -> Result<(), CartError> {
        let json = serde_json::to_string(&self.lines)
            .map_err(|err| CartError::PersistenceCorrupt(err.to_string()))?;
        self.storage.set(keys::CART, &json)?;
        Ok(())
    }

    // ===== Notifications =====

    /// Register a callback invoked after every persisted mutation.
    ///
    /// The callback receives the store itself and re-reads whatever it
    /// renders through the getters.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&Self) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Persist best-effort, then notify.
    ///
    /// A failed save keeps the in-memory mutation and logs; subscribers
    /// are told either way so views stay in sync with memory.
    fn changed(&self) {
        if let Err(err) = self.save() {
            tracing::warn!("Cart not persisted, keeping in-memory state: {err}");
        }
        self.notify();
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(self);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (CartStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        let cart = CartStore::new(Arc::new(Catalog::builtin()), storage.clone());
        (cart, storage)
    }

    /// Storage double whose writes always fail.
    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_add_then_merge_then_remove() {
        let (mut cart, _) = store();
        let id = ProductId::new(1);

        cart.add(id).unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), Price::from_paise(8999));

        cart.add_with_quantity(id, 2).unwrap();
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Price::from_paise(26997));
        assert_eq!(cart.lines().len(), 1);

        assert!(cart.remove(id));
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_unknown_product_changes_nothing() {
        let (mut cart, storage) = store();

        let err = cart.add(ProductId::new(999)).unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(id) if id.get() == 999));
        assert!(cart.is_empty());

        // Nothing was persisted either.
        assert_eq!(storage.get(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_add_clamps_quantity_to_one() {
        let (mut cart, _) = store();

        cart.add_with_quantity(ProductId::new(4), 0).unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_update_quantity_clamps_and_reports_hit() {
        let (mut cart, _) = store();
        let id = ProductId::new(4);
        cart.add(id).unwrap();

        assert!(cart.update_quantity(id, 0));
        assert_eq!(cart.lines()[0].quantity, 1);

        assert!(cart.update_quantity(id, 50));
        assert_eq!(cart.lines()[0].quantity, 50);
    }

    #[test]
    fn test_update_quantity_absent_id_is_silent() {
        let (mut cart, storage) = store();
        cart.add(ProductId::new(1)).unwrap();
        let persisted = storage.get(keys::CART).unwrap();

        let notified = Rc::new(Cell::new(0u32));
        let seen = notified.clone();
        cart.subscribe(move |_| seen.set(seen.get() + 1));

        assert!(!cart.update_quantity(ProductId::new(999), 5));
        assert_eq!(notified.get(), 0);
        assert_eq!(storage.get(keys::CART).unwrap(), persisted);
    }

    #[test]
    fn test_remove_absent_id_still_persists_and_notifies() {
        let (mut cart, storage) = store();

        let notified = Rc::new(Cell::new(0u32));
        let seen = notified.clone();
        cart.subscribe(move |_| seen.set(seen.get() + 1));

        assert!(!cart.remove(ProductId::new(999)));
        assert!(cart.is_empty());
        assert_eq!(notified.get(), 1);
        assert_eq!(storage.get(keys::CART).unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_lines_never_duplicate_ids() {
        let (mut cart, _) = store();

        cart.add(ProductId::new(1)).unwrap();
        cart.add_with_quantity(ProductId::new(2), 3).unwrap();
        cart.add(ProductId::new(1)).unwrap();
        cart.update_quantity(ProductId::new(2), 1);
        cart.remove(ProductId::new(1));
        cart.add(ProductId::new(1)).unwrap();

        let ids: HashSet<ProductId> = cart.lines().iter().map(|line| line.product.id).collect();
        assert_eq!(ids.len(), cart.lines().len());
    }

    #[test]
    fn test_total_sums_line_subtotals_exactly() {
        let (mut cart, _) = store();

        cart.add_with_quantity(ProductId::new(1), 3).unwrap(); // 3 x 89.99
        cart.add(ProductId::new(7)).unwrap(); // 24.99

        assert_eq!(
            cart.total(),
            Price::from_paise(3 * 8999) + Price::from_paise(2499)
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let storage = Arc::new(MemoryStorage::default());
        let catalog = Arc::new(Catalog::builtin());

        let mut first = CartStore::new(catalog.clone(), storage.clone());
        first.add_with_quantity(ProductId::new(3), 2).unwrap();
        first.add(ProductId::new(10)).unwrap();

        let mut second = CartStore::new(catalog, storage);
        second.load();

        assert_eq!(second.lines(), first.lines());
        assert_eq!(second.total(), first.total());
    }

    #[test]
    fn test_load_missing_slot_keeps_empty_cart() {
        let (mut cart, _) = store();

        let notified = Rc::new(Cell::new(0u32));
        let seen = notified.clone();
        cart.subscribe(move |_| seen.set(seen.get() + 1));

        cart.load();
        assert!(cart.is_empty());
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_load_notifies_on_restore() {
        let storage = Arc::new(MemoryStorage::default());
        let catalog = Arc::new(Catalog::builtin());

        let mut first = CartStore::new(catalog.clone(), storage.clone());
        first.add(ProductId::new(5)).unwrap();

        let mut second = CartStore::new(catalog, storage);
        let observed = Rc::new(Cell::new(0u32));
        let seen = observed.clone();
        second.subscribe(move |cart| seen.set(cart.count()));

        second.load();
        assert_eq!(observed.get(), 1);
    }

    #[test]
    fn test_load_corrupt_json_resets_to_empty() {
        let (mut cart, storage) = store();
        storage.set(keys::CART, "{ not json").unwrap();

        assert!(matches!(
            cart.read_persisted(),
            Err(CartError::PersistenceCorrupt(_))
        ));

        cart.load();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_read_persisted_rejects_invariant_violations() {
        let (cart, storage) = store();
        let catalog = Catalog::builtin();
        let product = catalog.find_by_id(ProductId::new(1)).unwrap().clone();

        let duplicate = vec![
            CartLine {
                product: product.clone(),
                quantity: 1,
            },
            CartLine {
                product: product.clone(),
                quantity: 2,
            },
        ];
        storage
            .set(keys::CART, &serde_json::to_string(&duplicate).unwrap())
            .unwrap();
        assert!(matches!(
            cart.read_persisted(),
            Err(CartError::PersistenceCorrupt(msg)) if msg.contains("duplicate")
        ));

        let zero = vec![CartLine {
            product,
            quantity: 0,
        }];
        storage
            .set(keys::CART, &serde_json::to_string(&zero).unwrap())
            .unwrap();
        assert!(matches!(
            cart.read_persisted(),
            Err(CartError::PersistenceCorrupt(msg)) if msg.contains("zero quantity")
        ));
    }

    #[test]
    fn test_mutation_survives_storage_failure() {
        let mut cart = CartStore::new(Arc::new(Catalog::builtin()), Arc::new(FailingStorage));

        let notified = Rc::new(Cell::new(0u32));
        let seen = notified.clone();
        cart.subscribe(move |_| seen.set(seen.get() + 1));

        cart.add(ProductId::new(1)).unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(notified.get(), 1);

        assert!(matches!(
            cart.save(),
            Err(CartError::PersistenceUnavailable(_))
        ));
    }

    #[test]
    fn test_subscribers_see_fresh_state() {
        let (mut cart, _) = store();
        let id = ProductId::new(11);

        let observed = Rc::new(Cell::new(0u32));
        let seen = observed.clone();
        cart.subscribe(move |cart| seen.set(cart.count()));

        cart.add_with_quantity(id, 2).unwrap();
        assert_eq!(observed.get(), 2);

        cart.update_quantity(id, 7);
        assert_eq!(observed.get(), 7);

        cart.remove(id);
        assert_eq!(observed.get(), 0);
    }

    #[test]
    fn test_persisted_shape_matches_original_format() {
        let (mut cart, storage) = store();
        cart.add(ProductId::new(1)).unwrap();

        let raw = storage.get(keys::CART).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        // Flat product fields plus quantity, camelCase keys.
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["name"], "NeuroMax Pro");
        assert_eq!(json[0]["originalPrice"], "119.99");
        assert_eq!(json[0]["quantity"], 1);
    }
}
