//! Search-as-you-type suggestions and category browsing.
//!
//! Scoring:
//! - Substring match on name, brand or composition: 1.0
//! - Otherwise best fuzzy similarity against the full name, each name word and the brand

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::CatalogItem;

/// Minimum score to be suggested.
const MIN_SUGGESTION_SCORE: f64 = 0.70;

/// A catalog item suggested for a partial query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub item: CatalogItem,
    /// Match quality (0.0 - 1.0)
    pub score: f64,
}

/// Rank `items` against `query`, best first, returning at most `limit`.
///
/// Equal scores keep input order.
pub fn suggest(items: &[CatalogItem], query: &str, limit: usize) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<Suggestion> = items
        .iter()
        .map(|item| Suggestion {
            item: item.clone(),
            score: score_item(item, &query),
        })
        .filter(|s| s.score >= MIN_SUGGESTION_SCORE)
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Items whose category equals `category`, ignoring case.
pub fn filter_by_category<'a>(items: &'a [CatalogItem], category: &str) -> Vec<&'a CatalogItem> {
    let wanted = category.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.category
                .as_deref()
                .is_some_and(|c| c.trim().to_lowercase() == wanted)
        })
        .collect()
}

fn score_item(item: &CatalogItem, query: &str) -> f64 {
    let name = item.name.to_lowercase();
    let brand = item.brand.as_deref().map(str::to_lowercase);
    let composition = item.composition.as_deref().map(str::to_lowercase);

    let contains = std::iter::once(Some(&name))
        .chain([brand.as_ref(), composition.as_ref()])
        .flatten()
        .any(|field| field.contains(query));
    if contains {
        return 1.0;
    }

    std::iter::once(name.as_str())
        .chain(name.split_whitespace())
        .chain(brand.as_deref())
        .map(|candidate| fuzzy_match(query, candidate))
        .fold(0.0, f64::max)
}

/// Blend of Jaro-Winkler (typos, prefixes) and normalised Levenshtein.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
