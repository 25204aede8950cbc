//! Product category enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to parse a [`Category`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?} (expected prescription, vitamins, otc, or wellness)")]
pub struct CategoryParseError(String);

/// The fixed set of product categories carried by the catalog.
///
/// Categories are closed: the catalog is seeded at startup and every
/// product belongs to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Prescription-only medication.
    Prescription,
    /// Vitamins and supplements.
    Vitamins,
    /// Over-the-counter medication.
    Otc,
    /// General wellness products.
    Wellness,
}

impl Category {
    /// All categories, in the order the storefront filter row shows them.
    pub const ALL: [Self; 4] = [
        Self::Prescription,
        Self::Vitamins,
        Self::Otc,
        Self::Wellness,
    ];

    /// The lowercase wire/display name of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::Vitamins => "vitamins",
            Self::Otc => "otc",
            Self::Wellness => "wellness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prescription" => Ok(Self::Prescription),
            "vitamins" => Ok(Self::Vitamins),
            "otc" => Ok(Self::Otc),
            "wellness" => Ok(Self::Wellness),
            _ => Err(CategoryParseError(s.to_owned())),
        }
    }
}
