//! Summary records shown on the home page lists ("popular products",
//! "featured pharmacies").

use serde::{Deserialize, Serialize};

/// Compact product card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub alt_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Monthly search count; rendered through the count formatter
    #[serde(default, alias = "currentMonthSearchCount")]
    pub search_count: Option<i64>,
}

impl ProductSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Compact pharmacy card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PharmacySummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub alt_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    /// Short tagline shown under the pharmacy name
    #[serde(default)]
    pub motto: Option<String>,
    /// Average review rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: Option<f64>,
}

impl PharmacySummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
