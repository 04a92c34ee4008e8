//! Decoding of API response bodies into core models.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use pharmamap_core::models::{
    CatalogItem, InventoryRow, PharmacyRef, PharmacySummary, ProductSummary, SearchResult,
    StockStatus,
};

/// Response decoding errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Server reported an error: {0}")]
    Server(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Pharmacy as sent inside inventory rows: embedded object or bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WirePharmacy {
    Id(String),
    Full(PharmacyRef),
}

impl From<WirePharmacy> for PharmacyRef {
    fn from(pharmacy: WirePharmacy) -> Self {
        match pharmacy {
            WirePharmacy::Id(id) => PharmacyRef {
                id: Some(id.clone()),
                ..PharmacyRef::new(id)
            },
            WirePharmacy::Full(pharmacy) => pharmacy,
        }
    }
}

/// Number sent either as JSON number or numeric string ("3.50").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Number(f64),
    Text(String),
}

impl WireNumber {
    /// Finite value only; "NaN" and "inf" strings are treated as missing.
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            WireNumber::Number(n) => Some(*n),
            WireNumber::Text(s) => s.trim().parse().ok(),
        };
        value.filter(|n: &f64| n.is_finite())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInventoryRow {
    pharmacy: WirePharmacy,
    #[serde(default)]
    price: Option<WireNumber>,
    #[serde(default)]
    quantity: Option<WireNumber>,
    #[serde(default)]
    stock_status: Option<StockStatus>,
}

impl WireInventoryRow {
    fn into_row(self, low_stock_threshold: i64) -> InventoryRow {
        let quantity = self
            .quantity
            .as_ref()
            .and_then(WireNumber::as_f64)
            .map(|q| q.round() as i64);
        let stock_status = self.stock_status.unwrap_or_else(|| {
            quantity
                .map(|q| StockStatus::from_quantity(q, low_stock_threshold))
                .unwrap_or_default()
        });

        InventoryRow {
            pharmacy: self.pharmacy.into(),
            price: self.price.as_ref().and_then(WireNumber::as_f64),
            quantity,
            stock_status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WireSearchResult {
    #[serde(alias = "medication")]
    item: CatalogItem,
    #[serde(default)]
    inventory: Vec<WireInventoryRow>,
}

/// Decode a medication search body.
///
/// Accepts `{ "results": [...] }` or a bare array. A missing stock status is
/// derived from the quantity using `low_stock_threshold`.
pub fn parse_search_response(
    json: &str,
    low_stock_threshold: i64,
) -> ApiResult<Vec<SearchResult>> {
    let wire: Vec<WireSearchResult> = parse_list(json, "results")?;

    Ok(wire
        .into_iter()
        .map(|result| SearchResult {
            item: result.item,
            inventory: result
                .inventory
                .into_iter()
                .map(|row| row.into_row(low_stock_threshold))
                .collect(),
        })
        .collect())
}

/// Decode a popular-products body (array or `{ "data": [...] }`).
pub fn parse_product_list(json: &str) -> ApiResult<Vec<ProductSummary>> {
    parse_list(json, "data")
}

/// Decode a featured-pharmacies body (array or `{ "data": [...] }`).
pub fn parse_pharmacy_list(json: &str) -> ApiResult<Vec<PharmacySummary>> {
    parse_list(json, "data")
}

fn parse_list<T: DeserializeOwned>(json: &str, key: &str) -> ApiResult<Vec<T>> {
    let value: Value = serde_json::from_str(json)?;

    let list = match value {
        Value::Array(list) => Value::Array(list),
        Value::Object(mut map) => {
            if let Some(message) = map.get("error").and_then(Value::as_str) {
                return Err(ApiError::Server(message.to_string()));
            }
            match map.remove(key) {
                Some(Value::Null) => return Ok(Vec::new()),
                Some(list) => list,
                None => {
                    return Err(ApiError::InvalidFormat(format!(
                        "missing \"{}\" field in response",
                        key
                    )))
                }
            }
        }
        other => {
            return Err(ApiError::InvalidFormat(format!(
                "expected object or array, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(serde_json::from_value(list)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
