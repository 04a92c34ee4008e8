//! Aggregator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::SortPolicy;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for list sizes, ordering and stock derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregatorConfig {
    /// Maximum number of "popular products" cards
    pub popular_limit: usize,
    /// Maximum number of "featured pharmacies" cards
    pub featured_limit: usize,
    /// Ordering of availability entries in the product dialog
    pub sort_policy: SortPolicy,
    /// Quantities at or below this are reported as low stock when the API omits a status
    pub low_stock_threshold: i64,
    /// Maximum number of search-as-you-type suggestions
    pub suggestion_limit: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            popular_limit: 8,
            featured_limit: 6,
            sort_policy: SortPolicy::InsertionOrder,
            low_stock_threshold: 10,
            suggestion_limit: 5,
        }
    }
}

impl AggregatorConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.popular_limit == 0 {
            return Err(ConfigError::Invalid("popularLimit must be positive".into()));
        }
        if self.featured_limit == 0 {
            return Err(ConfigError::Invalid("featuredLimit must be positive".into()));
        }
        if self.suggestion_limit == 0 {
            return Err(ConfigError::Invalid("suggestionLimit must be positive".into()));
        }
        if self.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid(
                "lowStockThreshold cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
