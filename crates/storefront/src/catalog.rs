//! Product catalog.
//!
//! The catalog is an in-memory, read-only product list. It ships with the
//! built-in pharmacy range and can alternatively be loaded from a JSON
//! file, which keeps the CLI and tests free to swap in fixtures. Lookups
//! preserve catalog order so listings render the same way every time.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shreya_pharmacy_core::{Category, Price, ProductId};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid catalog JSON.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        /// Path that was being parsed.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Two products share the same id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

// =============================================================================
// Product
// =============================================================================

/// A single catalog entry.
///
/// Field names follow the persisted JSON shape (`originalPrice`,
/// `inStock`), so catalog files and persisted cart lines read back
/// without a mapping layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable numeric id, referenced by cart lines.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Shelf the product sits on.
    pub category: Category,
    /// Current selling price.
    pub price: Price,
    /// Pre-discount price, present only while the product is on sale.
    #[serde(default)]
    pub original_price: Option<Price>,
    /// Emoji standing in for product imagery.
    pub icon: String,
    /// Merchandising badge such as "Best Seller".
    #[serde(default)]
    pub badge: Option<String>,
    /// One-sentence marketing copy.
    pub description: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// Review count shown next to the product.
    pub reviews: u32,
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in pharmacy range.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
        }
    }

    /// Build a catalog from an explicit product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog from a JSON file holding an array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read,
    /// [`CatalogError::Parse`] if it is not valid catalog JSON, and
    /// [`CatalogError::DuplicateId`] if two entries share an id.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_products(products)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products on the given shelf, in catalog order.
    #[must_use]
    pub fn filter_by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Case-insensitive substring search over product name and category.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.category.as_str().contains(&needle)
            })
            .collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "NeuroMax Pro".to_string(),
            category: Category::Prescription,
            price: Price::from_paise(8999),
            original_price: Some(Price::from_paise(11999)),
            icon: "🧠".to_string(),
            badge: Some("Best Seller".to_string()),
            description: "Advanced cognitive enhancement formula for peak mental performance."
                .to_string(),
            sku: "PHX-NMP-001".to_string(),
            in_stock: true,
            reviews: 248,
        },
        Product {
            id: ProductId::new(2),
            name: "ImmunoBoost Ultra".to_string(),
            category: Category::Vitamins,
            price: Price::from_paise(4599),
            original_price: None,
            icon: "🛡️".to_string(),
            badge: None,
            description: "Complete immune system support with 25 essential vitamins and minerals."
                .to_string(),
            sku: "PHX-IBU-002".to_string(),
            in_stock: true,
            reviews: 182,
        },
        Product {
            id: ProductId::new(3),
            name: "CardioVitalis".to_string(),
            category: Category::Prescription,
            price: Price::from_paise(12499),
            original_price: Some(Price::from_paise(14999)),
            icon: "❤️".to_string(),
            badge: Some("New".to_string()),
            description: "Advanced cardiovascular support for optimal heart health.".to_string(),
            sku: "PHX-CVT-003".to_string(),
            in_stock: true,
            reviews: 156,
        },
        Product {
            id: ProductId::new(4),
            name: "SleepSync Night".to_string(),
            category: Category::Otc,
            price: Price::from_paise(3499),
            original_price: None,
            icon: "🌙".to_string(),
            badge: None,
            description: "Natural sleep aid for restful, rejuvenating sleep cycles.".to_string(),
            sku: "PHX-SSN-004".to_string(),
            in_stock: true,
            reviews: 312,
        },
        Product {
            id: ProductId::new(5),
            name: "FlexiJoint Plus".to_string(),
            category: Category::Wellness,
            price: Price::from_paise(5699),
            original_price: Some(Price::from_paise(6999)),
            icon: "🦴".to_string(),
            badge: Some("Popular".to_string()),
            description:
                "Joint mobility and flexibility support with glucosamine and chondroitin."
                    .to_string(),
            sku: "PHX-FJP-005".to_string(),
            in_stock: true,
            reviews: 198,
        },
        Product {
            id: ProductId::new(6),
            name: "DigestiZyme Pro".to_string(),
            category: Category::Wellness,
            price: Price::from_paise(3899),
            original_price: None,
            icon: "🧬".to_string(),
            badge: None,
            description: "Advanced digestive enzyme complex for optimal nutrient absorption."
                .to_string(),
            sku: "PHX-DZP-006".to_string(),
            in_stock: true,
            reviews: 145,
        },
        Product {
            id: ProductId::new(7),
            name: "VitaD3 Supreme".to_string(),
            category: Category::Vitamins,
            price: Price::from_paise(2499),
            original_price: Some(Price::from_paise(2999)),
            icon: "☀️".to_string(),
            badge: None,
            description: "High-potency vitamin D3 for bone health and immune function."
                .to_string(),
            sku: "PHX-VD3-007".to_string(),
            in_stock: true,
            reviews: 289,
        },
        Product {
            id: ProductId::new(8),
            name: "AllerClear Max".to_string(),
            category: Category::Otc,
            price: Price::from_paise(2899),
            original_price: None,
            icon: "🌸".to_string(),
            badge: Some("Seasonal".to_string()),
            description: "24-hour allergy relief without drowsiness.".to_string(),
            sku: "PHX-ACM-008".to_string(),
            in_stock: false,
            reviews: 176,
        },
        Product {
            id: ProductId::new(9),
            name: "OmegaPure 3000".to_string(),
            category: Category::Vitamins,
            price: Price::from_paise(4299),
            original_price: Some(Price::from_paise(5499)),
            icon: "🐟".to_string(),
            badge: Some("Premium".to_string()),
            description: "Triple-strength omega-3 fish oil for heart and brain health."
                .to_string(),
            sku: "PHX-OP3-009".to_string(),
            in_stock: true,
            reviews: 234,
        },
        Product {
            id: ProductId::new(10),
            name: "PainRelief Gel".to_string(),
            category: Category::Otc,
            price: Price::from_paise(1999),
            original_price: None,
            icon: "💆".to_string(),
            badge: None,
            description: "Fast-acting topical pain relief with cooling menthol.".to_string(),
            sku: "PHX-PRG-010".to_string(),
            in_stock: true,
            reviews: 167,
        },
        Product {
            id: ProductId::new(11),
            name: "BioProbiotic 50B".to_string(),
            category: Category::Wellness,
            price: Price::from_paise(4999),
            original_price: Some(Price::from_paise(5999)),
            icon: "🦠".to_string(),
            badge: Some("Top Rated".to_string()),
            description: "50 billion CFU probiotic blend with 15 strains for gut health."
                .to_string(),
            sku: "PHX-BP5-011".to_string(),
            in_stock: true,
            reviews: 321,
        },
        Product {
            id: ProductId::new(12),
            name: "StressZen Complex".to_string(),
            category: Category::Wellness,
            price: Price::from_paise(3699),
            original_price: None,
            icon: "🧘".to_string(),
            badge: None,
            description: "Adaptogenic herbs for stress relief and mental clarity.".to_string(),
            sku: "PHX-SZC-012".to_string(),
            in_stock: true,
            reviews: 198,
        },
    ]
}
