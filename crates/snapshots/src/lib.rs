//! `agrovault-snapshots` — read-only projection of precomputed aggregate
//! documents.
//!
//! Singleton topics live under the fixed key `"current"` in their own
//! collections; directory topics (silos, warehouses) are plain listings.
//! Everything here is populated by an out-of-scope seeding/ingestion
//! process; no write path exists. Unseeded topics read as empty structures
//! rather than errors.

use std::sync::Arc;

use serde_json::{Value as JsonValue, json};

use agrovault_core::ServiceResult;
use agrovault_store::{DocumentStore, StoreError};

/// Fixed key for singleton snapshot documents.
const CURRENT: &str = "current";

#[derive(Clone)]
pub struct SnapshotService {
    store: Arc<dyn DocumentStore>,
}

impl SnapshotService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Dashboard stats document.
    pub async fn dashboard(&self) -> ServiceResult<JsonValue> {
        self.singleton("dashboard_stats").await
    }

    /// The full analytics bundle (trends + loss analysis).
    pub async fn analytics(&self) -> ServiceResult<JsonValue> {
        self.singleton("analytics").await
    }

    /// `storageTrends` slice of the analytics bundle.
    pub async fn storage_trends(&self) -> ServiceResult<JsonValue> {
        self.section("analytics", "storageTrends", json!([])).await
    }

    /// `lossAnalysis` slice of the analytics bundle.
    pub async fn loss_analysis(&self) -> ServiceResult<JsonValue> {
        self.section("analytics", "lossAnalysis", json!([])).await
    }

    /// `stats` slice of the consumer data document.
    pub async fn consumer_stats(&self) -> ServiceResult<JsonValue> {
        self.section("consumer_data", "stats", json!({})).await
    }

    /// Full consumer data document.
    pub async fn consumer(&self) -> ServiceResult<JsonValue> {
        self.singleton("consumer_data").await
    }

    /// Latest sensor readings document.
    pub async fn sensor_readings(&self) -> ServiceResult<JsonValue> {
        self.singleton("sensor_readings").await
    }

    /// Logistics overview document.
    pub async fn logistics(&self) -> ServiceResult<JsonValue> {
        self.singleton("logistics").await
    }

    /// Per-silo status listing. Silo documents carry their own `id` field;
    /// the storage key is stripped like the singleton topics.
    pub async fn silos(&self) -> ServiceResult<Vec<JsonValue>> {
        let mut docs = self.listing("silo_status").await?;
        for doc in &mut docs {
            if let Some(obj) = doc.as_object_mut() {
                obj.remove("_id");
            }
        }
        Ok(docs)
    }

    /// Warehouse directory listing.
    pub async fn warehouses(&self) -> ServiceResult<Vec<JsonValue>> {
        self.listing("warehouses").await
    }

    /// Fetch a singleton document, stripping the fixed storage key from the
    /// response (the key is an implementation detail, not data).
    async fn singleton(&self, collection: &str) -> ServiceResult<JsonValue> {
        match self.store.get(collection, CURRENT).await {
            Ok(mut doc) => {
                if let Some(obj) = doc.as_object_mut() {
                    obj.remove("_id");
                }
                Ok(doc)
            }
            Err(StoreError::NotFound) => Ok(json!({})),
            Err(e) => Err(e.into()),
        }
    }

    async fn section(
        &self,
        collection: &str,
        key: &str,
        default: JsonValue,
    ) -> ServiceResult<JsonValue> {
        let doc = self.singleton(collection).await?;
        Ok(doc.get(key).cloned().unwrap_or(default))
    }

    async fn listing(&self, collection: &str) -> ServiceResult<Vec<JsonValue>> {
        Ok(self.store.list(collection, None).await?)
    }
}
