//! In-memory document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::document::{FieldFilter, unique_field};
use crate::error::{StoreError, StoreResult};
use crate::DocumentStore;

/// Transient backing over shared mutable maps.
///
/// Intended for tests and credential-free dev runs. The `RwLock` serializes
/// mutations so concurrent callers cannot lose updates; `BTreeMap` keys give
/// the stable iteration order the store contract requires.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, JsonValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(doc: &JsonValue, filter: &FieldFilter) -> bool {
    doc.get(&filter.field) == Some(&filter.value)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: &str, doc: JsonValue) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let docs = collections.entry(collection.to_string()).or_default();

        if docs.contains_key(id) {
            return Err(StoreError::DuplicateKey(format!("{collection}/{id}")));
        }

        if let Some(field) = unique_field(collection) {
            if let Some(value) = doc.get(field) {
                if docs.values().any(|d| d.get(field) == Some(value)) {
                    return Err(StoreError::DuplicateKey(format!(
                        "{collection}.{field} = {value}"
                    )));
                }
            }
        }

        docs.insert(id.to_string(), doc);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<JsonValue> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonMap<String, JsonValue>,
    ) -> StoreResult<JsonValue> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let docs = collections.get_mut(collection).ok_or(StoreError::NotFound)?;
        if !docs.contains_key(id) {
            return Err(StoreError::NotFound);
        }

        if let Some(field) = unique_field(collection) {
            if let Some(value) = fields.get(field) {
                if docs
                    .iter()
                    .any(|(other, d)| other != id && d.get(field) == Some(value))
                {
                    return Err(StoreError::DuplicateKey(format!(
                        "{collection}.{field} = {value}"
                    )));
                }
            }
        }

        let doc = docs.get_mut(id).ok_or(StoreError::NotFound)?;

        let target = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::Codec(format!("{collection}/{id} is not an object")))?;

        for (key, value) in fields {
            target.insert(key, value);
        }

        Ok(doc.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<JsonValue> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self, collection: &str, filter: Option<FieldFilter>) -> StoreResult<Vec<JsonValue>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .values()
            .filter(|doc| filter.as_ref().is_none_or(|f| matches(doc, f)))
            .cloned()
            .collect())
    }

    async fn find_by(
        &self,
        collection: &str,
        field: &str,
        value: &JsonValue,
    ) -> StoreResult<Option<JsonValue>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(collections.get(collection).and_then(|docs| {
            docs.values()
                .find(|doc| doc.get(field) == Some(value))
                .cloned()
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_get_roundtrips() {
        let store = MemoryStore::new();
        let doc = json!({"_id": "a", "name": "Wheat"});
        store.insert("inventory", "a", doc.clone()).await.unwrap();
        assert_eq!(store.get("inventory", "a").await.unwrap(), doc);
    }

    #[tokio::test]
    async fn insert_duplicate_id_fails() {
        let store = MemoryStore::new();
        store.insert("inventory", "a", json!({})).await.unwrap();
        let err = store.insert("inventory", "a", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn users_email_is_unique() {
        let store = MemoryStore::new();
        store
            .insert("users", "u1", json!({"email": "a@b.io"}))
            .await
            .unwrap();
        let err = store
            .insert("users", "u2", json!({"email": "a@b.io"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));

        // Email uniqueness is scoped to the users collection.
        store
            .insert("inventory", "i1", json!({"email": "a@b.io"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_cannot_take_another_users_email() {
        let store = MemoryStore::new();
        store
            .insert("users", "u1", json!({"email": "a@b.io"}))
            .await
            .unwrap();
        store
            .insert("users", "u2", json!({"email": "c@d.io"}))
            .await
            .unwrap();

        let mut fields = JsonMap::new();
        fields.insert("email".to_string(), json!("a@b.io"));
        let err = store.update("users", "u2", fields).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));

        // Re-asserting a document's own email is not a conflict.
        let mut fields = JsonMap::new();
        fields.insert("email".to_string(), json!("c@d.io"));
        let merged = store.update("users", "u2", fields).await.unwrap();
        assert_eq!(merged["email"], "c@d.io");
    }

    #[tokio::test]
    async fn update_merges_and_returns_full_doc() {
        let store = MemoryStore::new();
        store
            .insert("inventory", "a", json!({"_id": "a", "name": "Wheat", "quantity": 10}))
            .await
            .unwrap();

        let mut fields = JsonMap::new();
        fields.insert("quantity".to_string(), json!(5));
        let merged = store.update("inventory", "a", fields).await.unwrap();

        assert_eq!(merged["quantity"], 5);
        assert_eq!(merged["name"], "Wheat");
    }

    #[tokio::test]
    async fn update_missing_doc_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("inventory", "missing", JsonMap::new())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn delete_twice_second_is_not_found() {
        let store = MemoryStore::new();
        let doc = json!({"_id": "a"});
        store.insert("inventory", "a", doc.clone()).await.unwrap();

        assert_eq!(store.delete("inventory", "a").await.unwrap(), doc);
        assert_eq!(
            store.delete("inventory", "a").await.unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn list_filters_by_field_equality() {
        let store = MemoryStore::new();
        store
            .insert("alerts", "1", json!({"severity": "high"}))
            .await
            .unwrap();
        store
            .insert("alerts", "2", json!({"severity": "low"}))
            .await
            .unwrap();

        let all = store.list("alerts", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let high = store
            .list("alerts", Some(FieldFilter::eq("severity", "high")))
            .await
            .unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0]["severity"], "high");
    }

    #[tokio::test]
    async fn list_order_is_stable() {
        let store = MemoryStore::new();
        for id in ["c", "a", "b"] {
            store.insert("inventory", id, json!({"_id": id})).await.unwrap();
        }

        let first = store.list("inventory", None).await.unwrap();
        let second = store.list("inventory", None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list("nothing", None).await.unwrap().is_empty());
    }
}
