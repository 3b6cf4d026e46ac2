//! Inventory item model and its request shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use agrovault_core::{ServiceError, ServiceResult, now_iso};
use agrovault_store::Document;

/// A monitored stock position in the warehouse.
///
/// `last_checked` is server-assigned and refreshed on every mutation;
/// quantity is kept non-negative at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: f64,
    pub unit: String,
    pub quality_status: String,
    pub last_checked: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl Document for InventoryItem {
    const COLLECTION: &'static str = "inventory";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Creation payload; omitted fields take the documented defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub quality_status: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl ItemDraft {
    /// Materialize an item with defaults applied and `lastChecked` set now.
    pub fn into_item(self, id: String) -> ServiceResult<InventoryItem> {
        let quantity = self.quantity.unwrap_or(0.0);
        if quantity < 0.0 {
            return Err(ServiceError::validation("Quantity must be non-negative"));
        }

        Ok(InventoryItem {
            id,
            name: self.name.unwrap_or_else(|| "Unnamed Item".to_string()),
            category: self.category.unwrap_or_else(|| "Uncategorized".to_string()),
            location: self.location.unwrap_or_else(|| "Unknown".to_string()),
            quantity,
            unit: self.unit.unwrap_or_else(|| "tons".to_string()),
            quality_status: self.quality_status.unwrap_or_else(|| "Good".to_string()),
            last_checked: now_iso(),
            temperature: self.temperature.unwrap_or(22.0),
            humidity: self.humidity.unwrap_or(60.0),
        })
    }
}

/// Partial update: only the eight recognized fields apply, anything else in
/// the request body is dropped by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub quality_status: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl ItemPatch {
    /// Supplied fields as a merge map, always including a fresh
    /// `lastChecked` timestamp.
    pub fn into_fields(self) -> ServiceResult<JsonMap<String, JsonValue>> {
        if self.quantity.is_some_and(|q| q < 0.0) {
            return Err(ServiceError::validation("Quantity must be non-negative"));
        }

        let mut fields = JsonMap::new();
        let mut put = |key: &str, value: Option<JsonValue>| {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        };

        put("name", self.name.map(JsonValue::from));
        put("category", self.category.map(JsonValue::from));
        put("location", self.location.map(JsonValue::from));
        put("quantity", self.quantity.map(JsonValue::from));
        put("unit", self.unit.map(JsonValue::from));
        put("qualityStatus", self.quality_status.map(JsonValue::from));
        put("temperature", self.temperature.map(JsonValue::from));
        put("humidity", self.humidity.map(JsonValue::from));
        fields.insert("lastChecked".to_string(), json!(now_iso()));

        Ok(fields)
    }
}
