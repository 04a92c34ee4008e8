//! Property tests for availability dedup and fallback merge.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use pharmamap_core::aggregate::{
    collect_availability, collect_availability_sorted, merge_with_fallback, resolve_key,
    AvailabilityTarget, SortPolicy,
};
use pharmamap_core::models::{
    CatalogItem, InventoryRow, PharmacyRef, PharmacySummary, ProductSummary, SearchResult,
    StockStatus,
};

const ITEM_NAMES: [&str; 3] = ["Panadol Extra", "panadol extra", "Augmentin 1g"];
const PHARMACY_NAMES: [&str; 5] = [
    "Al Rahbani Pharmacy",
    "al rahbani pharmacy",
    "Pharmacie Mazen",
    "Wardieh Pharmacy",
    "Saydaliyat Tripoli",
];

fn stock_status() -> impl Strategy<Value = StockStatus> {
    prop_oneof![
        Just(StockStatus::InStock),
        Just(StockStatus::LowStock),
        Just(StockStatus::OutOfStock),
    ]
}

fn pharmacy() -> impl Strategy<Value = PharmacyRef> {
    (0..PHARMACY_NAMES.len(), proptest::option::of(0u8..3)).prop_map(|(name, id)| PharmacyRef {
        id: id.map(|i| format!("ph-{}", i)),
        ..PharmacyRef::new(PHARMACY_NAMES[name])
    })
}

fn inventory_row() -> impl Strategy<Value = InventoryRow> {
    (
        pharmacy(),
        proptest::option::of(0u32..5000),
        proptest::option::of(0i64..200),
        stock_status(),
    )
        .prop_map(|(pharmacy, cents, quantity, stock_status)| InventoryRow {
            pharmacy,
            price: cents.map(|c| f64::from(c) / 100.0),
            quantity,
            stock_status,
        })
}

fn search_result() -> impl Strategy<Value = SearchResult> {
    (
        0..ITEM_NAMES.len(),
        proptest::option::of(0u8..2),
        proptest::collection::vec(inventory_row(), 0..6),
    )
        .prop_map(|(name, id, inventory)| SearchResult {
            item: CatalogItem {
                id: id.map(|i| format!("med-{}", i)),
                ..CatalogItem::new(ITEM_NAMES[name])
            },
            inventory,
        })
}

fn target() -> impl Strategy<Value = AvailabilityTarget> {
    (
        proptest::option::of(0u8..2),
        proptest::option::of(0..ITEM_NAMES.len()),
    )
        .prop_map(|(id, name)| AvailabilityTarget {
            id: id.map(|i| format!("med-{}", i)),
            name: name.map(|n| ITEM_NAMES[n].to_string()),
        })
}

/// Optional text that is sometimes empty or whitespace-only.
fn soft_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[A-Za-z]{1,10}",
    ])
}

fn product() -> impl Strategy<Value = ProductSummary> {
    (
        "[A-Za-z]{1,8}( [A-Za-z]{1,8})?",
        proptest::option::of("[a-z0-9]{4}"),
        proptest::option::of(0i64..50_000),
        soft_text(),
        soft_text(),
    )
        .prop_map(|(name, id, search_count, category, image_url)| ProductSummary {
            id,
            search_count,
            category,
            image_url,
            ..ProductSummary::new(name)
        })
}

fn pharmacy_summary() -> impl Strategy<Value = PharmacySummary> {
    (
        "[A-Za-z]{1,8}( [A-Za-z]{1,8})?",
        proptest::option::of("[a-z0-9]{4}"),
        soft_text(),
        soft_text(),
        proptest::option::of(0u8..=50),
    )
        .prop_map(|(name, id, city, motto, rating)| PharmacySummary {
            id,
            city,
            motto,
            rating: rating.map(|r| f64::from(r) / 10.0),
            ..PharmacySummary::new(name)
        })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Present text is kept; blank text takes the fallback's value when it has one.
fn expected_text(live: &Option<String>, fill: Option<&Option<String>>) -> Option<String> {
    match fill {
        Some(from) if is_blank(live) && !is_blank(from) => from.clone(),
        _ => live.clone(),
    }
}

fn expected_value<V: Copy>(live: Option<V>, fill: Option<Option<V>>) -> Option<V> {
    live.or(fill.flatten())
}

proptest! {
    #[test]
    fn availability_has_unique_pharmacy_keys(
        results in proptest::collection::vec(search_result(), 0..6),
        target in target(),
    ) {
        let entries = collect_availability(&results, &target);
        let keys: HashSet<String> = entries
            .iter()
            .map(|e| resolve_key(&e.pharmacy).unwrap())
            .collect();

        prop_assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn availability_keeps_first_seen_row(
        results in proptest::collection::vec(search_result(), 0..6),
        target in target(),
    ) {
        let mut first: HashMap<String, &InventoryRow> = HashMap::new();
        for result in results.iter().filter(|r| target.matches(r)) {
            for row in &result.inventory {
                first.entry(resolve_key(&row.pharmacy).unwrap()).or_insert(row);
            }
        }

        let entries = collect_availability(&results, &target);
        prop_assert_eq!(entries.len(), first.len());
        for entry in &entries {
            let row = first[&resolve_key(&entry.pharmacy).unwrap()];
            prop_assert_eq!(&entry.pharmacy, &row.pharmacy);
            prop_assert_eq!(entry.price, row.price);
            prop_assert_eq!(entry.quantity, row.quantity);
            prop_assert_eq!(entry.stock_status, row.stock_status);
        }
    }

    #[test]
    fn availability_is_idempotent(
        results in proptest::collection::vec(search_result(), 0..6),
        target in target(),
    ) {
        prop_assert_eq!(
            collect_availability(&results, &target),
            collect_availability(&results, &target)
        );
    }

    #[test]
    fn sorting_never_changes_membership(
        results in proptest::collection::vec(search_result(), 0..6),
        target in target(),
    ) {
        let unsorted = collect_availability(&results, &target);
        let sorted = collect_availability_sorted(&results, &target, SortPolicy::PriceAscending);

        prop_assert_eq!(sorted.len(), unsorted.len());
        for entry in &sorted {
            prop_assert!(unsorted.contains(entry));
        }
    }

    #[test]
    fn merge_respects_limit_and_preserves_primary(
        primary in proptest::collection::vec(product(), 0..10),
        fallback in proptest::collection::vec(product(), 0..10),
        limit in 0usize..12,
    ) {
        let merged = merge_with_fallback(&primary, &fallback, limit);
        prop_assert!(merged.len() <= limit);

        if primary.is_empty() {
            prop_assert_eq!(merged.len(), fallback.len().min(limit));
            for (out, src) in merged.iter().zip(&fallback) {
                prop_assert_eq!(&out.name, &src.name);
                prop_assert!(out.id.is_some());
            }
        } else {
            prop_assert_eq!(merged.len(), primary.len().min(limit));
            for (i, (out, src)) in merged.iter().zip(&primary).enumerate() {
                let fill = fallback.get(i);
                prop_assert_eq!(&out.name, &src.name);
                prop_assert_eq!(&out.id, &src.id);
                prop_assert_eq!(
                    out.search_count,
                    expected_value(src.search_count, fill.map(|f| f.search_count))
                );
                prop_assert_eq!(
                    out.category.clone(),
                    expected_text(&src.category, fill.map(|f| &f.category))
                );
                prop_assert_eq!(
                    out.image_url.clone(),
                    expected_text(&src.image_url, fill.map(|f| &f.image_url))
                );
            }
        }
    }

    #[test]
    fn pharmacy_merge_only_fills_blank_soft_fields(
        primary in proptest::collection::vec(pharmacy_summary(), 1..8),
        fallback in proptest::collection::vec(pharmacy_summary(), 0..8),
        limit in 1usize..10,
    ) {
        let merged = merge_with_fallback(&primary, &fallback, limit);
        prop_assert_eq!(merged.len(), primary.len().min(limit));

        for (i, (out, src)) in merged.iter().zip(&primary).enumerate() {
            let fill = fallback.get(i);
            prop_assert_eq!(&out.name, &src.name);
            prop_assert_eq!(&out.id, &src.id);
            prop_assert_eq!(
                out.motto.clone(),
                expected_text(&src.motto, fill.map(|f| &f.motto))
            );
            prop_assert_eq!(
                out.city.clone(),
                expected_text(&src.city, fill.map(|f| &f.city))
            );
            prop_assert_eq!(out.rating, expected_value(src.rating, fill.map(|f| f.rating)));
        }
    }
}
