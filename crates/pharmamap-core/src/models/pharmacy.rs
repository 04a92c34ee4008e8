//! Pharmacy reference models.

use serde::{Deserialize, Serialize};

/// Street address of a pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// A pharmacy as embedded in inventory rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyRef {
    #[serde(default)]
    pub id: Option<String>,
    /// Secondary identifier (document-store `_id`)
    #[serde(default, rename = "_id")]
    pub alt_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
}

impl PharmacyRef {
    /// Create a pharmacy reference with only a name.
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

    /// Single-line address ("street, city"), skipping missing parts.
    pub fn display_address(&self) -> Option<String> {
        let address = self.address.as_ref()?;
        let parts: Vec<&str> = [address.street.as_deref(), address.city.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
