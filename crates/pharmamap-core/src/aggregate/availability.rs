//! Per-pharmacy availability for one catalog item.
//!
//! Walks search results in input order and keeps the first inventory row seen
//! for each pharmacy key. Later rows for the same pharmacy are discarded,
//! never merged.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{AvailabilityEntry, SearchResult};

use super::resolve_key;

/// Which item to collect availability for. Either field is sufficient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityTarget {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl AvailabilityTarget {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// True when neither an id nor a name was given.
    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.name().is_none()
    }

    /// Match by id OR by case-insensitive name.
    pub fn matches(&self, result: &SearchResult) -> bool {
        let by_id = match (self.id(), result.item.id.as_deref()) {
            (Some(target), Some(item)) => target == item,
            _ => false,
        };
        let by_name = self
            .name()
            .map(|name| result.item.name_matches(name))
            .unwrap_or(false);
        by_id || by_name
    }
}

/// Output ordering for availability lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// First-seen order.
    #[default]
    InsertionOrder,
    /// Cheapest first; unknown prices last.
    PriceAscending,
    /// Largest stock first; unknown quantities last.
    QuantityDescending,
}

/// Collect one availability entry per unique pharmacy, in first-seen order.
pub fn collect_availability(
    results: &[SearchResult],
    target: &AvailabilityTarget,
) -> Vec<AvailabilityEntry> {
    if target.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for result in results.iter().filter(|r| target.matches(r)) {
        for row in &result.inventory {
            let key = match resolve_key(&row.pharmacy) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(item = %result.item.name, "skipping inventory row: {}", e);
                    continue;
                }
            };
            if seen.insert(key) {
                entries.push(AvailabilityEntry::from(row));
            }
        }
    }

    tracing::debug!(
        results = results.len(),
        pharmacies = entries.len(),
        "collected availability"
    );
    entries
}

/// Like [`collect_availability`], then ordered by `policy`.
///
/// The sort is stable, so entries with equal sort keys keep first-seen order.
pub fn collect_availability_sorted(
    results: &[SearchResult],
    target: &AvailabilityTarget,
    policy: SortPolicy,
) -> Vec<AvailabilityEntry> {
    let mut entries = collect_availability(results, target);
    match policy {
        SortPolicy::InsertionOrder => {}
        SortPolicy::PriceAscending => {
            entries.sort_by(|a, b| missing_last(a.price, b.price, |x, y| x.total_cmp(y)));
        }
        SortPolicy::QuantityDescending => {
            entries.sort_by(|a, b| missing_last(a.quantity, b.quantity, |x, y| y.cmp(x)));
        }
    }
    entries
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
