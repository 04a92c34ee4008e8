//! Stable identity keys for heterogeneous entities.
//!
//! Resolution order: bare key → primary id → secondary id → name slug.

use crate::models::{CatalogItem, PharmacyRef, PharmacySummary, ProductSummary};

use super::{AggregateError, AggregateResult};

/// Anything that can be reduced to a stable identity key.
pub trait Keyed {
    /// A value that already is a key (bare strings). Returned unchanged.
    fn bare_key(&self) -> Option<&str> {
        None
    }

    /// Authoritative identifier.
    fn primary_id(&self) -> Option<&str> {
        None
    }

    /// Alternate identifier field, consulted when the primary one is missing.
    fn secondary_id(&self) -> Option<&str> {
        None
    }

    /// Display name used to derive a slug as the last resort.
    fn key_name(&self) -> Option<&str> {
        None
    }
}

impl Keyed for str {
    fn bare_key(&self) -> Option<&str> {
        Some(self)
    }
}

impl Keyed for String {
    fn bare_key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn primary_id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn secondary_id(&self) -> Option<&str> {
                    self.alt_id.as_deref()
                }

                fn key_name(&self) -> Option<&str> {
                    Some(self.name.as_str())
                }
            }
        )*
    };
}

impl_keyed!(CatalogItem, PharmacyRef, ProductSummary, PharmacySummary);

/// Resolve the identity key of an entity.
pub fn resolve_key<K: Keyed + ?Sized>(entity: &K) -> AggregateResult<String> {
    if let Some(key) = entity.bare_key() {
        return Ok(key.to_string());
    }

    if let Some(id) = non_empty(entity.primary_id()) {
        return Ok(id.to_string());
    }

    if let Some(id) = non_empty(entity.secondary_id()) {
        return Ok(id.to_string());
    }

    match entity.key_name().map(slugify) {
        Some(slug) if !slug.is_empty() => Ok(slug),
        _ => Err(AggregateError::InvalidEntity(
            "entity has neither an identifier nor a name".into(),
        )),
    }
}

/// Lowercase `name` and collapse each whitespace run into a single hyphen.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
