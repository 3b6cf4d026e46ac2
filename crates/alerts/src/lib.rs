//! `agrovault-alerts` — sensor alert listing and acknowledgment.
//!
//! Alerts are seeded by an out-of-scope ingestion process; the only write
//! path through this service is the acknowledgment state transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue, json};

use agrovault_core::{ServiceError, ServiceResult, now_iso};
use agrovault_store::{Document, DocumentStore, DocumentStoreExt, FieldFilter, StoreError};

/// A sensor alert.
///
/// Seeded documents carry extra display fields (title, message, source);
/// those pass through untouched via `extra`. `acknowledged_at` is present
/// iff `acknowledged` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "_id")]
    pub id: String,
    pub severity: String,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(rename = "acknowledgedAt", skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl Document for Alert {
    const COLLECTION: &'static str = "alerts";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn DocumentStore>,
}

impl AlertService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All alerts, or the subset at one severity.
    pub async fn list(&self, severity: Option<&str>) -> ServiceResult<Vec<Alert>> {
        let filter = severity.map(|s| FieldFilter::eq("severity", s));
        Ok(self.store.list_docs::<Alert>(filter).await?)
    }

    /// Mark an alert acknowledged, stamping `acknowledgedAt`.
    pub async fn acknowledge(&self, id: &str) -> ServiceResult<Alert> {
        let mut fields = JsonMap::new();
        fields.insert("acknowledged".to_string(), json!(true));
        fields.insert("acknowledgedAt".to_string(), json!(now_iso()));

        let alert = self
            .store
            .update_doc::<Alert>(id, fields)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => ServiceError::not_found("Alert not found"),
                other => other.into(),
            })?;

        tracing::info!(alert_id = %id, severity = %alert.severity, "alert acknowledged");
        Ok(alert)
    }
}
