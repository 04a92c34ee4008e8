//! Endpoint paths for the PharmaMap REST API.

/// Medication search and detail collection.
pub const MEDICATIONS_PATH: &str = "/medications";

/// Pharmacy collection.
pub const PHARMACIES_PATH: &str = "/pharmacies";

/// Path for the medication search endpoint.
///
/// `GET /medications?search=<query>&inStock=<bool>` → `{ results: SearchResult[] }`
pub fn medication_search_path(query: &str, in_stock: bool) -> String {
    format!(
        "{}?search={}&inStock={}",
        MEDICATIONS_PATH,
        urlencoding::encode(query.trim()),
        in_stock
    )
}

/// Path for a single medication.
pub fn medication_path(id: &str) -> String {
    format!("{}/{}", MEDICATIONS_PATH, urlencoding::encode(id))
}

/// Path for the pharmacy list.
pub fn pharmacies_path() -> String {
    PHARMACIES_PATH.to_string()
}

/// Path for the most-searched medications this month.
pub fn popular_medications_path(limit: usize) -> String {
    format!("{}/popular?limit={}", MEDICATIONS_PATH, limit)
}

/// Path for the featured pharmacies list.
pub fn featured_pharmacies_path(limit: usize) -> String {
    format!("{}/featured?limit={}", PHARMACIES_PATH, limit)
}

/// Absolute URLs against a configured API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
}

impl ApiEndpoints {
    /// Create endpoints for `base_url` (e.g., "https://api.pharmamap.app/api").
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path produced by this module onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn medication_search(&self, query: &str, in_stock: bool) -> String {
        self.url(&medication_search_path(query, in_stock))
    }

    pub fn medication(&self, id: &str) -> String {
        self.url(&medication_path(id))
    }

    pub fn pharmacies(&self) -> String {
        self.url(&pharmacies_path())
    }

    pub fn popular_medications(&self, limit: usize) -> String {
        self.url(&popular_medications_path(limit))
    }

    pub fn featured_pharmacies(&self, limit: usize) -> String {
        self.url(&featured_pharmacies_path(limit))
    }
}
