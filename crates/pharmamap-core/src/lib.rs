//! PharmaMap Core Library
//!
//! View-model aggregation for the PharmaMap medication-discovery UI.
//!
//! # Architecture
//!
//! ```text
//!  REST API (search, popular, featured)      Identity provider
//!            │                                       │
//!            ▼                                       ▼
//!   [ already-fetched data ]               SessionStore ──► session_cache
//!            │                                       │          (SQLite)
//!   ┌────────┴─────────────────────┐                 │
//!   │          aggregate           │                 ▼
//!   │  resolve_key                 │           subscribers
//!   │  collect_availability        │          (header, profile,
//!   │  format_count                │           admin panel)
//!   │  merge_with_fallback ◄─ curated lists
//!   └────────┬─────────────────────┘
//!            ▼
//!      display-ready view models
//! ```
//!
//! # Core Principle
//!
//! **Aggregation is pure.** Every call receives fresh inputs and returns a
//! freshly allocated output; nothing is cached between calls.
//!
//! # Modules
//!
//! - [`aggregate`]: Identifier resolution, availability dedup, count labels, fallback merge
//! - [`models`]: Domain types (CatalogItem, PharmacyRef, SearchResult, etc.)
//! - [`search`]: Search-as-you-type suggestions
//! - [`session`]: Observable current-user store
//! - [`db`]: SQLite session cache
//! - [`config`]: Aggregator configuration
//! - [`logging`]: Tracing subscriber setup

pub mod aggregate;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use aggregate::{
    collect_availability, format_count, merge_with_fallback, resolve_key, AggregateError,
    Aggregator, AvailabilityTarget, SortPolicy,
};
pub use config::AggregatorConfig;
pub use db::Database;
pub use models::{
    Address, AvailabilityEntry, CatalogItem, CurrentUser, InventoryRow, PharmacyRef,
    PharmacySummary, ProductSummary, SearchResult, StockStatus, UserRole,
};
pub use session::{SessionStore, SubscriptionId};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PharmaMapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<AggregateError> for PharmaMapError {
    fn from(e: AggregateError) -> Self {
        PharmaMapError::InvalidInput(e.to_string())
    }
}

impl From<db::DbError> for PharmaMapError {
    fn from(e: db::DbError) -> Self {
        PharmaMapError::DatabaseError(e.to_string())
    }
}

impl From<session::SessionError> for PharmaMapError {
    fn from(e: session::SessionError) -> Self {
        PharmaMapError::DatabaseError(e.to_string())
    }
}

impl From<config::ConfigError> for PharmaMapError {
    fn from(e: config::ConfigError) -> Self {
        PharmaMapError::ConfigError(e.to_string())
    }
}

// =========================================================================
// Stateless Functions (exported to FFI)
// =========================================================================

/// Initialise JSON logging for the host process.
///
/// `filter` is an `EnvFilter` directive such as `"pharmamap_core=debug"`.
/// Returns `false` when logging was already initialised.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> bool {
    logging::init_with_filter(filter.as_deref())
}

/// Stable key for a pharmacy (id, then alternate id, then name slug).
#[uniffi::export]
pub fn resolve_pharmacy_key(pharmacy: FfiPharmacy) -> Result<String, PharmaMapError> {
    let pharmacy: PharmacyRef = pharmacy.into();
    Ok(resolve_key(&pharmacy)?)
}

/// Abbreviated search count label; `None` hides the element.
#[uniffi::export]
pub fn format_search_count(value: Option<i64>) -> Result<Option<String>, PharmaMapError> {
    Ok(format_count(value)?)
}

/// One availability entry per unique pharmacy, in first-seen order.
#[uniffi::export]
pub fn collect_pharmacy_availability(
    results: Vec<FfiSearchResult>,
    target_id: Option<String>,
    target_name: Option<String>,
) -> Vec<FfiAvailabilityEntry> {
    let results: Vec<SearchResult> = results.into_iter().map(|r| r.into()).collect();
    let target = AvailabilityTarget {
        id: target_id,
        name: target_name,
    };
    collect_availability(&results, &target)
        .into_iter()
        .map(|e| e.into())
        .collect()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a catalog with default configuration.
#[uniffi::export]
pub fn default_catalog() -> Arc<PharmaMapCatalog> {
    Arc::new(PharmaMapCatalog {
        aggregator: Aggregator::default(),
    })
}

/// Create a catalog from a JSON configuration document.
#[uniffi::export]
pub fn catalog_from_config_json(json: String) -> Result<Arc<PharmaMapCatalog>, PharmaMapError> {
    let config = AggregatorConfig::from_json_str(&json)?;
    Ok(Arc::new(PharmaMapCatalog {
        aggregator: Aggregator::new(config),
    }))
}

/// Open or create the session cache at the given path.
#[uniffi::export]
pub fn open_session(path: String) -> Result<Arc<PharmaMapSession>, PharmaMapError> {
    Ok(Arc::new(PharmaMapSession {
        store: SessionStore::open(&path)?,
    }))
}

/// Create a session with an in-memory cache (for testing).
#[uniffi::export]
pub fn open_session_in_memory() -> Result<Arc<PharmaMapSession>, PharmaMapError> {
    Ok(Arc::new(PharmaMapSession {
        store: SessionStore::open_in_memory()?,
    }))
}

// =========================================================================
// Catalog API Object
// =========================================================================

/// Configured view-model builder for catalog pages.
#[derive(uniffi::Object)]
pub struct PharmaMapCatalog {
    aggregator: Aggregator,
}

#[uniffi::export]
impl PharmaMapCatalog {
    /// Availability of one item, ordered per the configured sort policy.
    pub fn availability(
        &self,
        results: Vec<FfiSearchResult>,
        target_id: Option<String>,
        target_name: Option<String>,
    ) -> Vec<FfiAvailabilityEntry> {
        let results: Vec<SearchResult> = results.into_iter().map(|r| r.into()).collect();
        let target = AvailabilityTarget {
            id: target_id,
            name: target_name,
        };
        self.aggregator
            .availability(&results, &target)
            .into_iter()
            .map(|e| e.into())
            .collect()
    }

    /// Popular products merged with the curated list.
    pub fn popular_products(&self, live: Vec<FfiProductSummary>) -> Vec<FfiProductSummary> {
        let live: Vec<ProductSummary> = live.into_iter().map(|p| p.into()).collect();
        self.aggregator
            .popular_products(&live)
            .into_iter()
            .map(|p| p.into())
            .collect()
    }

    /// Featured pharmacies merged with the curated list.
    pub fn featured_pharmacies(&self, live: Vec<FfiPharmacySummary>) -> Vec<FfiPharmacySummary> {
        let live: Vec<PharmacySummary> = live.into_iter().map(|p| p.into()).collect();
        self.aggregator
            .featured_pharmacies(&live)
            .into_iter()
            .map(|p| p.into())
            .collect()
    }

    /// Search count label; malformed counts yield `None`.
    pub fn search_count_label(&self, value: Option<i64>) -> Option<String> {
        self.aggregator.search_count_label(value)
    }

    /// Search-as-you-type suggestions, best first.
    pub fn suggest(&self, items: Vec<FfiCatalogItem>, query: String) -> Vec<FfiCatalogItem> {
        let items: Vec<CatalogItem> = items.into_iter().map(|i| i.into()).collect();
        search::suggest(&items, &query, self.aggregator.config().suggestion_limit)
            .into_iter()
            .map(|s| s.item.into())
            .collect()
    }
}

// =========================================================================
// Session API Object
// =========================================================================

/// Receives session changes on the host side.
#[uniffi::export(callback_interface)]
pub trait SessionObserver: Send + Sync {
    fn on_session_changed(&self, user: Option<FfiCurrentUser>);
}

/// Thread-safe session store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PharmaMapSession {
    store: SessionStore,
}

#[uniffi::export]
impl PharmaMapSession {
    /// The signed-in user, if any.
    pub fn current_user(&self) -> Result<Option<FfiCurrentUser>, PharmaMapError> {
        Ok(self.store.current_user()?.map(|u| u.into()))
    }

    /// Replace the signed-in user. Returns whether anything changed.
    pub fn set_current_user(&self, user: Option<FfiCurrentUser>) -> Result<bool, PharmaMapError> {
        Ok(self.store.set_current_user(user.map(|u| u.into()))?)
    }

    /// Sign out.
    pub fn clear(&self) -> Result<bool, PharmaMapError> {
        Ok(self.store.clear()?)
    }

    /// Register an observer. Returns a subscription id for `unsubscribe`.
    pub fn subscribe(&self, observer: Box<dyn SessionObserver>) -> Result<String, PharmaMapError> {
        let id = self.store.subscribe(move |user| {
            observer.on_session_changed(user.cloned().map(|u| u.into()));
        })?;
        Ok(id.to_string())
    }

    /// Remove an observer.
    pub fn unsubscribe(&self, subscription_id: String) -> Result<bool, PharmaMapError> {
        let id: SubscriptionId = subscription_id
            .parse()
            .map_err(|e: uuid::Error| PharmaMapError::InvalidInput(e.to_string()))?;
        Ok(self.store.unsubscribe(id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe catalog item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCatalogItem {
    pub id: Option<String>,
    pub alt_id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub dosage: Option<String>,
    pub form: Option<String>,
    pub brand: Option<String>,
    pub composition: Option<String>,
    pub usage: Option<String>,
    pub description: Option<String>,
    pub side_effects: Option<String>,
    pub current_month_search_count: Option<i64>,
}

impl From<CatalogItem> for FfiCatalogItem {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            alt_id: item.alt_id,
            name: item.name,
            category: item.category,
            dosage: item.dosage,
            form: item.form,
            brand: item.brand,
            composition: item.composition,
            usage: item.usage,
            description: item.description,
            side_effects: item.side_effects,
            current_month_search_count: item.current_month_search_count,
        }
    }
}

impl From<FfiCatalogItem> for CatalogItem {
    fn from(item: FfiCatalogItem) -> Self {
        CatalogItem {
            id: item.id,
            alt_id: item.alt_id,
            name: item.name,
            category: item.category,
            dosage: item.dosage,
            form: item.form,
            brand: item.brand,
            composition: item.composition,
            usage: item.usage,
            description: item.description,
            side_effects: item.side_effects,
            current_month_search_count: item.current_month_search_count,
        }
    }
}

/// FFI-safe pharmacy reference.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPharmacy {
    pub id: Option<String>,
    pub alt_id: Option<String>,
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
}

impl From<PharmacyRef> for FfiPharmacy {
    fn from(pharmacy: PharmacyRef) -> Self {
        let (street, city) = pharmacy
            .address
            .map(|a| (a.street, a.city))
            .unwrap_or_default();
        Self {
            id: pharmacy.id,
            alt_id: pharmacy.alt_id,
            name: pharmacy.name,
            street,
            city,
        }
    }
}

impl From<FfiPharmacy> for PharmacyRef {
    fn from(pharmacy: FfiPharmacy) -> Self {
        let address = if pharmacy.street.is_some() || pharmacy.city.is_some() {
            Some(Address {
                street: pharmacy.street,
                city: pharmacy.city,
            })
        } else {
            None
        };
        PharmacyRef {
            id: pharmacy.id,
            alt_id: pharmacy.alt_id,
            name: pharmacy.name,
            address,
        }
    }
}

/// FFI-safe stock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiStockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl From<StockStatus> for FfiStockStatus {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::InStock => FfiStockStatus::InStock,
            StockStatus::LowStock => FfiStockStatus::LowStock,
            StockStatus::OutOfStock => FfiStockStatus::OutOfStock,
        }
    }
}

impl From<FfiStockStatus> for StockStatus {
    fn from(status: FfiStockStatus) -> Self {
        match status {
            FfiStockStatus::InStock => StockStatus::InStock,
            FfiStockStatus::LowStock => StockStatus::LowStock,
            FfiStockStatus::OutOfStock => StockStatus::OutOfStock,
        }
    }
}

/// FFI-safe inventory row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryRow {
    pub pharmacy: FfiPharmacy,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub stock_status: FfiStockStatus,
}

impl From<FfiInventoryRow> for InventoryRow {
    fn from(row: FfiInventoryRow) -> Self {
        InventoryRow {
            pharmacy: row.pharmacy.into(),
            price: row.price,
            quantity: row.quantity,
            stock_status: row.stock_status.into(),
        }
    }
}

/// FFI-safe search result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchResult {
    pub item: FfiCatalogItem,
    pub inventory: Vec<FfiInventoryRow>,
}

impl From<FfiSearchResult> for SearchResult {
    fn from(result: FfiSearchResult) -> Self {
        SearchResult {
            item: result.item.into(),
            inventory: result.inventory.into_iter().map(|r| r.into()).collect(),
        }
    }
}

/// FFI-safe availability entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAvailabilityEntry {
    pub pharmacy: FfiPharmacy,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub stock_status: FfiStockStatus,
    /// Human label for the stock status
    pub stock_label: String,
    /// False only when the pharmacy is out of stock
    pub available: bool,
}

impl From<AvailabilityEntry> for FfiAvailabilityEntry {
    fn from(entry: AvailabilityEntry) -> Self {
        Self {
            pharmacy: entry.pharmacy.into(),
            price: entry.price,
            quantity: entry.quantity,
            stock_status: entry.stock_status.into(),
            stock_label: entry.stock_status.label().to_string(),
            available: entry.stock_status.is_available(),
        }
    }
}

/// FFI-safe product card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProductSummary {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub search_count: Option<i64>,
}

impl From<ProductSummary> for FfiProductSummary {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.id.or(product.alt_id),
            name: product.name,
            category: product.category,
            image_url: product.image_url,
            search_count: product.search_count,
        }
    }
}

impl From<FfiProductSummary> for ProductSummary {
    fn from(product: FfiProductSummary) -> Self {
        ProductSummary {
            id: product.id,
            alt_id: None,
            name: product.name,
            category: product.category,
            image_url: product.image_url,
            search_count: product.search_count,
        }
    }
}

/// FFI-safe pharmacy card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPharmacySummary {
    pub id: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub motto: Option<String>,
    pub rating: Option<f64>,
}

impl From<PharmacySummary> for FfiPharmacySummary {
    fn from(pharmacy: PharmacySummary) -> Self {
        Self {
            id: pharmacy.id.or(pharmacy.alt_id),
            name: pharmacy.name,
            city: pharmacy.city,
            motto: pharmacy.motto,
            rating: pharmacy.rating,
        }
    }
}

impl From<FfiPharmacySummary> for PharmacySummary {
    fn from(pharmacy: FfiPharmacySummary) -> Self {
        PharmacySummary {
            id: pharmacy.id,
            alt_id: None,
            name: pharmacy.name,
            city: pharmacy.city,
            motto: pharmacy.motto,
            rating: pharmacy.rating,
        }
    }
}

/// FFI-safe user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiUserRole {
    Customer,
    Pharmacist,
    Admin,
}

/// FFI-safe signed-in user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCurrentUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: FfiUserRole,
}

impl From<CurrentUser> for FfiCurrentUser {
    fn from(user: CurrentUser) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            role: match user.role {
                UserRole::Customer => FfiUserRole::Customer,
                UserRole::Pharmacist => FfiUserRole::Pharmacist,
                UserRole::Admin => FfiUserRole::Admin,
            },
        }
    }
}

impl From<FfiCurrentUser> for CurrentUser {
    fn from(user: FfiCurrentUser) -> Self {
        CurrentUser {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            role: match user.role {
                FfiUserRole::Customer => UserRole::Customer,
                FfiUserRole::Pharmacist => UserRole::Pharmacist,
                FfiUserRole::Admin => UserRole::Admin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver(Arc<AtomicUsize>);

    impl SessionObserver for CountingObserver {
        fn on_session_changed(&self, _user: Option<FfiCurrentUser>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ffi_user(uid: &str) -> FfiCurrentUser {
        FfiCurrentUser {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
            role: FfiUserRole::Admin,
        }
    }

    #[test]
    fn test_format_search_count_errors_on_negative() {
        assert_eq!(format_search_count(Some(250)).unwrap().as_deref(), Some("+250"));
        assert!(matches!(
            format_search_count(Some(-1)),
            Err(PharmaMapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_pharmacy_key() {
        let pharmacy = FfiPharmacy {
            id: None,
            alt_id: None,
            name: "Al Rahbani Pharmacy".into(),
            street: None,
            city: Some("Beirut".into()),
        };
        assert_eq!(resolve_pharmacy_key(pharmacy).unwrap(), "al-rahbani-pharmacy");
    }

    #[test]
    fn test_session_round_trip_and_observer() {
        let session = open_session_in_memory().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let id = session
            .subscribe(Box::new(CountingObserver(Arc::clone(&calls))))
            .unwrap();

        assert!(session.set_current_user(Some(ffi_user("u1"))).unwrap());
        let user = session.current_user().unwrap().unwrap();
        assert_eq!(user.uid, "u1");
        assert_eq!(user.role, FfiUserRole::Admin);

        assert!(session.unsubscribe(id).unwrap());
        session.clear().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_rejects_malformed_id() {
        let session = open_session_in_memory().unwrap();
        assert!(matches!(
            session.unsubscribe("not-a-uuid".into()),
            Err(PharmaMapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_catalog_from_config_json() {
        let catalog = catalog_from_config_json(r#"{"popularLimit": 3}"#.into()).unwrap();
        assert_eq!(catalog.popular_products(Vec::new()).len(), 3);

        assert!(matches!(
            catalog_from_config_json(r#"{"popularLimit": 0}"#.into()),
            Err(PharmaMapError::ConfigError(_))
        ));
    }

    #[test]
    fn test_collect_pharmacy_availability_labels() {
        let pharmacy = FfiPharmacy {
            id: Some("ph-1".into()),
            alt_id: None,
            name: "Pharmacie Mazen".into(),
            street: None,
            city: None,
        };
        let item = FfiCatalogItem::from(CatalogItem::new("Zyrtec").with_id("med-3"));
        let results = vec![FfiSearchResult {
            item,
            inventory: vec![FfiInventoryRow {
                pharmacy,
                price: Some(6.25),
                quantity: Some(2),
                stock_status: FfiStockStatus::LowStock,
            }],
        }];

        let entries = collect_pharmacy_availability(results, Some("med-3".into()), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].stock_label, "Low stock");
        assert!(entries[0].available);
        assert_eq!(entries[0].pharmacy.id.as_deref(), Some("ph-1"));
    }

    #[test]
    fn test_out_of_stock_entry_is_unavailable() {
        let entry = AvailabilityEntry {
            pharmacy: PharmacyRef::new("Wardieh Pharmacy"),
            price: Some(3.0),
            quantity: Some(0),
            stock_status: StockStatus::OutOfStock,
        };

        let ffi = FfiAvailabilityEntry::from(entry);
        assert!(!ffi.available);
        assert_eq!(ffi.stock_label, "Out of stock");
    }
}
