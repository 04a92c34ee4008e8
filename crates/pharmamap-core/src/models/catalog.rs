//! Medication catalog models.

use serde::{Deserialize, Serialize};

/// A single medication in the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Primary identifier assigned by the API
    #[serde(default)]
    pub id: Option<String>,
    /// Secondary identifier (document-store `_id`)
    #[serde(default, rename = "_id")]
    pub alt_id: Option<String>,
    /// Display name (e.g., "Panadol Extra")
    pub name: String,
    /// Therapeutic category (e.g., "Pain Relief")
    #[serde(default)]
    pub category: Option<String>,
    /// Dosage strength (e.g., "500mg")
    #[serde(default)]
    pub dosage: Option<String>,
    /// Dosage form (e.g., "tablet", "syrup")
    #[serde(default)]
    pub form: Option<String>,
    /// Manufacturer brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Active ingredients
    #[serde(default)]
    pub composition: Option<String>,
    /// Indications
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    /// Number of searches for this item in the current month
    #[serde(default)]
    pub current_month_search_count: Option<i64>,
}

impl CatalogItem {
    /// Create a catalog item with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper to attach a primary identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Case-insensitive name comparison. Surrounding whitespace is significant.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
