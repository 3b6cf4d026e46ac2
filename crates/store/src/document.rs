//! Typed document access on top of the raw JSON store.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{DocumentStore, StoreError, StoreResult};

/// Ties a typed model to its collection name and key.
///
/// Documents serialize their id under `_id` (the wire format the frontend
/// already consumes); the store additionally keys them by the same value.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Unique-field constraint per collection.
///
/// Only the users collection carries one: emails are unique,
/// case-sensitive exact match.
pub fn unique_field(collection: &str) -> Option<&'static str> {
    match collection {
        "users" => Some("email"),
        _ => None,
    }
}

/// Single-field equality filter (category, severity, email lookups).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: JsonValue,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

fn encode<D: Document>(doc: &D) -> StoreResult<JsonValue> {
    serde_json::to_value(doc).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode<D: Document>(value: JsonValue) -> StoreResult<D> {
    serde_json::from_value(value).map_err(|e| StoreError::Codec(e.to_string()))
}

/// Typed convenience layer over [`DocumentStore`].
///
/// Blanket-implemented, so it works on `Arc<dyn DocumentStore>` handles.
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    async fn insert_doc<D: Document>(&self, doc: &D) -> StoreResult<()> {
        self.insert(D::COLLECTION, doc.id(), encode(doc)?).await
    }

    async fn get_doc<D: Document>(&self, id: &str) -> StoreResult<D> {
        decode(self.get(D::COLLECTION, id).await?)
    }

    async fn update_doc<D: Document>(
        &self,
        id: &str,
        fields: JsonMap<String, JsonValue>,
    ) -> StoreResult<D> {
        decode(self.update(D::COLLECTION, id, fields).await?)
    }

    async fn delete_doc<D: Document>(&self, id: &str) -> StoreResult<D> {
        decode(self.delete(D::COLLECTION, id).await?)
    }

    async fn list_docs<D: Document>(&self, filter: Option<FieldFilter>) -> StoreResult<Vec<D>> {
        self.list(D::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn find_doc_by<D: Document>(
        &self,
        field: &str,
        value: &JsonValue,
    ) -> StoreResult<Option<D>> {
        match self.find_by(D::COLLECTION, field, value).await? {
            Some(v) => Ok(Some(decode(v)?)),
            None => Ok(None),
        }
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}
