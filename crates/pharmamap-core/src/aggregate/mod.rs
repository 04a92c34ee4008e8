//! Catalog view-model aggregation.
//!
//! Pure transformations from already-fetched API data into display-ready
//! structures. Nothing here performs I/O or holds state between calls.

mod availability;
mod count;
mod curated;
mod fallback;
mod key;

pub use availability::*;
pub use count::*;
pub use curated::*;
pub use fallback::*;
pub use key::*;

use thiserror::Error;

use crate::config::AggregatorConfig;
use crate::models::{AvailabilityEntry, PharmacySummary, ProductSummary, SearchResult};

/// Aggregation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Invalid count: {0}")]
    InvalidCount(i64),
}

pub type AggregateResult<T> = Result<T, AggregateError>;

/// Aggregation entry point configured with list limits and ordering.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator with the given configuration.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Availability of one item across pharmacies, ordered per the configured policy.
    pub fn availability(
        &self,
        results: &[SearchResult],
        target: &AvailabilityTarget,
    ) -> Vec<AvailabilityEntry> {
        collect_availability_sorted(results, target, self.config.sort_policy)
    }

    /// Home page "popular products", never empty while the curated list is not.
    pub fn popular_products(&self, live: &[ProductSummary]) -> Vec<ProductSummary> {
        merge_with_fallback(live, &popular_products(), self.config.popular_limit)
    }

    /// Home page "featured pharmacies", never empty while the curated list is not.
    pub fn featured_pharmacies(&self, live: &[PharmacySummary]) -> Vec<PharmacySummary> {
        merge_with_fallback(live, &featured_pharmacies(), self.config.featured_limit)
    }

    /// Search count label; malformed counts hide the element instead of failing.
    pub fn search_count_label(&self, value: Option<i64>) -> Option<String> {
        match format_count(value) {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!("hiding search count: {}", e);
                None
            }
        }
    }

    /// Get the configuration for direct access.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }
}
