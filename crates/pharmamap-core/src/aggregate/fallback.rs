//! Positional merge of live records with curated fallback records.
//!
//! Which fields the fallback may fill is an explicit per-type table
//! ([`FallbackRecord::soft_fields`]). Every other field is authoritative:
//! the live value is kept as-is, even when absent.

use crate::models::{PharmacySummary, ProductSummary};

use super::{resolve_key, Keyed};

/// A field the fallback record may back-fill when the live record lacks it.
pub struct SoftField<T: 'static> {
    /// Wire name, for diagnostics
    pub name: &'static str,
    /// Copies the field from `fallback` into `record` if `record` has no value
    pub backfill: fn(record: &mut T, fallback: &T),
}

/// Records that can take part in a fallback merge.
pub trait FallbackRecord: Keyed + Clone + 'static {
    /// The soft-field policy table for this record type.
    fn soft_fields() -> &'static [SoftField<Self>];

    /// Whether the record already carries an explicit identifier.
    fn has_id(&self) -> bool;

    /// Assign a synthesised identifier.
    fn set_id(&mut self, id: String);
}

/// Merge `primary` with positional `fallback` records, returning at most `limit`.
///
/// Non-empty `primary` wins: each record is kept and only its soft fields are
/// filled from `fallback[i]`. Empty `primary` yields the first `limit`
/// fallback records, each given a stable id derived from its name.
pub fn merge_with_fallback<T: FallbackRecord>(
    primary: &[T],
    fallback: &[T],
    limit: usize,
) -> Vec<T> {
    if primary.is_empty() {
        if !fallback.is_empty() {
            tracing::info!(count = fallback.len().min(limit), "using fallback records");
        }
        return fallback
            .iter()
            .take(limit)
            .map(|record| {
                let mut record = record.clone();
                if !record.has_id() {
                    if let Ok(key) = resolve_key(&record) {
                        record.set_id(key);
                    }
                }
                record
            })
            .collect();
    }

    primary
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| {
            let mut record = record.clone();
            if let Some(fill) = fallback.get(i) {
                for field in T::soft_fields() {
                    (field.backfill)(&mut record, fill);
                }
            }
            record
        })
        .collect()
}

fn backfill_text(slot: &mut Option<String>, from: &Option<String>) {
    if slot.as_deref().map_or(true, |s| s.trim().is_empty()) {
        if let Some(value) = from.as_deref().filter(|s| !s.trim().is_empty()) {
            *slot = Some(value.to_string());
        }
    }
}

fn backfill_value<V: Copy>(slot: &mut Option<V>, from: &Option<V>) {
    if slot.is_none() {
        *slot = *from;
    }
}

fn has_explicit_id(id: &Option<String>, alt_id: &Option<String>) -> bool {
    [id, alt_id]
        .into_iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
}

fn product_search_count(record: &mut ProductSummary, fallback: &ProductSummary) {
    backfill_value(&mut record.search_count, &fallback.search_count);
}

fn product_category(record: &mut ProductSummary, fallback: &ProductSummary) {
    backfill_text(&mut record.category, &fallback.category);
}

fn product_image(record: &mut ProductSummary, fallback: &ProductSummary) {
    backfill_text(&mut record.image_url, &fallback.image_url);
}

static PRODUCT_SOFT_FIELDS: [SoftField<ProductSummary>; 3] = [
    SoftField {
        name: "searchCount",
        backfill: product_search_count,
    },
    SoftField {
        name: "category",
        backfill: product_category,
    },
    SoftField {
        name: "imageUrl",
        backfill: product_image,
    },
];

impl FallbackRecord for ProductSummary {
    fn soft_fields() -> &'static [SoftField<Self>] {
        &PRODUCT_SOFT_FIELDS
    }

    fn has_id(&self) -> bool {
        has_explicit_id(&self.id, &self.alt_id)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

fn pharmacy_motto(record: &mut PharmacySummary, fallback: &PharmacySummary) {
    backfill_text(&mut record.motto, &fallback.motto);
}

fn pharmacy_city(record: &mut PharmacySummary, fallback: &PharmacySummary) {
    backfill_text(&mut record.city, &fallback.city);
}

fn pharmacy_rating(record: &mut PharmacySummary, fallback: &PharmacySummary) {
    backfill_value(&mut record.rating, &fallback.rating);
}

static PHARMACY_SOFT_FIELDS: [SoftField<PharmacySummary>; 3] = [
    SoftField {
        name: "motto",
        backfill: pharmacy_motto,
    },
    SoftField {
        name: "city",
        backfill: pharmacy_city,
    },
    SoftField {
        name: "rating",
        backfill: pharmacy_rating,
    },
];

impl FallbackRecord for PharmacySummary {
    fn soft_fields() -> &'static [SoftField<Self>] {
        &PHARMACY_SOFT_FIELDS
    }

    fn has_id(&self) -> bool {
        has_explicit_id(&self.id, &self.alt_id)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
