//! Golden tests for key resolution and count labels.

use pharmamap_core::aggregate::{format_count, resolve_key, slugify};
use pharmamap_core::models::{CatalogItem, PharmacyRef};

/// Test case from golden file.
struct KeyCase {
    id: &'static str,
    input_id: Option<&'static str>,
    input_alt_id: Option<&'static str>,
    input_name: &'static str,
    expected_key: Option<&'static str>,
}

fn get_key_cases() -> Vec<KeyCase> {
    vec![
        KeyCase {
            id: "slug-from-name",
            input_id: None,
            input_alt_id: None,
            input_name: "Al Rahbani Pharmacy",
            expected_key: Some("al-rahbani-pharmacy"),
        },
        KeyCase {
            id: "primary-id",
            input_id: Some("ph-100"),
            input_alt_id: Some("65f0c1"),
            input_name: "Pharmacie Mazen",
            expected_key: Some("ph-100"),
        },
        KeyCase {
            id: "alt-id",
            input_id: None,
            input_alt_id: Some("65f0c1"),
            input_name: "Pharmacie Mazen",
            expected_key: Some("65f0c1"),
        },
        KeyCase {
            id: "empty-primary-falls-through",
            input_id: Some(""),
            input_alt_id: None,
            input_name: "Wardieh Pharmacy",
            expected_key: Some("wardieh-pharmacy"),
        },
        KeyCase {
            id: "whitespace-runs",
            input_id: None,
            input_alt_id: None,
            input_name: "  Saydaliyat \t\n Tripoli ",
            expected_key: Some("saydaliyat-tripoli"),
        },
        KeyCase {
            id: "unicode-name",
            input_id: None,
            input_alt_id: None,
            input_name: "Pharmacie Élite",
            expected_key: Some("pharmacie-élite"),
        },
        KeyCase {
            id: "no-identity",
            input_id: None,
            input_alt_id: None,
            input_name: "   ",
            expected_key: None,
        },
    ]
}

#[test]
fn test_golden_pharmacy_keys() {
    for case in get_key_cases() {
        let pharmacy = PharmacyRef {
            id: case.input_id.map(String::from),
            alt_id: case.input_alt_id.map(String::from),
            name: case.input_name.into(),
            address: None,
        };

        let result = resolve_key(&pharmacy).ok();
        assert_eq!(
            result.as_deref(),
            case.expected_key,
            "Case {}: key mismatch",
            case.id
        );
    }
}

#[test]
fn test_catalog_items_resolve_like_pharmacies() {
    for case in get_key_cases() {
        let item = CatalogItem {
            id: case.input_id.map(String::from),
            alt_id: case.input_alt_id.map(String::from),
            ..CatalogItem::new(case.input_name)
        };

        let result = resolve_key(&item).ok();
        assert_eq!(
            result.as_deref(),
            case.expected_key,
            "Case {}: key mismatch",
            case.id
        );
    }
}

#[test]
fn test_bare_keys_pass_through() {
    for key in ["ph-1", "Al Rahbani Pharmacy", ""] {
        assert_eq!(resolve_key(key).unwrap(), key);
    }
}

#[test]
fn test_slugify_is_idempotent() {
    for name in ["Panadol Extra", "al-rahbani-pharmacy", "  Vitamin  D3 "] {
        let once = slugify(name);
        assert_eq!(slugify(&once), once, "slug of {} should be stable", name);
    }
}

#[test]
fn test_all_count_labels() {
    let count_tests = vec![
        (Some(0), Some("+0")),
        (Some(1), Some("+1")),
        (Some(250), Some("+250")),
        (Some(999), Some("+999")),
        (Some(1000), Some("+1k")),
        (Some(4500), Some("+4.5k")),
        (Some(1250), Some("+1.3k")),
        (Some(3250), Some("+3.3k")),
        (Some(1999), Some("+2.0k")),
        (Some(10000), Some("+10k")),
        (Some(12000), Some("+12k")),
        (Some(123400), Some("+123.4k")),
        (None, None),
    ];

    for (value, expected) in count_tests {
        let result = format_count(value).unwrap();
        assert_eq!(
            result.as_deref(),
            expected,
            "Count {:?} should format as {:?}, got {:?}",
            value,
            expected,
            result
        );
    }
}

#[test]
fn test_negative_counts_are_rejected() {
    for value in [-1, -1000, i64::MIN] {
        assert!(format_count(Some(value)).is_err(), "{} should be rejected", value);
    }
}
