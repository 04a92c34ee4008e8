//! Search results and per-pharmacy inventory.

use serde::{Deserialize, Serialize};

use super::{CatalogItem, PharmacyRef};

/// Stock level reported by a pharmacy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    #[default]
    #[serde(alias = "in_stock")]
    InStock,
    #[serde(alias = "low_stock")]
    LowStock,
    #[serde(alias = "out_of_stock")]
    OutOfStock,
}

impl StockStatus {
    /// Derive a status from a quantity when the API does not report one.
    pub fn from_quantity(quantity: i64, low_threshold: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= low_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

/// One pharmacy's stock of the item in a [`SearchResult`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub pharmacy: PharmacyRef,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: StockStatus,
}

/// A catalog item bundled with its inventory snapshot, as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub item: CatalogItem,
    #[serde(default)]
    pub inventory: Vec<InventoryRow>,
}

/// Where an item can be obtained: one entry per unique pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    pub pharmacy: PharmacyRef,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub stock_status: StockStatus,
}

impl From<&InventoryRow> for AvailabilityEntry {
    fn from(row: &InventoryRow) -> Self {
        Self {
            pharmacy: row.pharmacy.clone(),
            price: row.price,
            quantity: row.quantity,
            stock_status: row.stock_status,
        }
    }
}
