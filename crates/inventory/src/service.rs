//! Inventory service over the document store.

use std::sync::Arc;

use agrovault_core::{EntityId, ServiceError, ServiceResult};
use agrovault_store::{DocumentStore, DocumentStoreExt, FieldFilter, StoreError};

use crate::item::{InventoryItem, ItemDraft, ItemPatch};

const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn DocumentStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All items, or the subset in one category.
    pub async fn list(&self, category: Option<&str>) -> ServiceResult<Vec<InventoryItem>> {
        let filter = category.map(|c| FieldFilter::eq("category", c));
        Ok(self.store.list_docs::<InventoryItem>(filter).await?)
    }

    /// Create an item with defaults for omitted fields.
    pub async fn create(&self, draft: ItemDraft) -> ServiceResult<InventoryItem> {
        let item = draft.into_item(EntityId::generate().into_string())?;
        self.store.insert_doc(&item).await?;
        tracing::info!(item_id = %item.id, category = %item.category, "inventory item created");
        Ok(item)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<InventoryItem> {
        self.store
            .get_doc::<InventoryItem>(id)
            .await
            .map_err(not_found_as_item)
    }

    /// Apply a partial update; `lastChecked` is always refreshed.
    pub async fn update(&self, id: &str, patch: ItemPatch) -> ServiceResult<InventoryItem> {
        let fields = patch.into_fields()?;
        self.store
            .update_doc::<InventoryItem>(id, fields)
            .await
            .map_err(not_found_as_item)
    }

    /// Remove an item, returning the removed record.
    pub async fn delete(&self, id: &str) -> ServiceResult<InventoryItem> {
        let deleted = self
            .store
            .delete_doc::<InventoryItem>(id)
            .await
            .map_err(not_found_as_item)?;
        tracing::info!(item_id = %id, "inventory item deleted");
        Ok(deleted)
    }
}

fn not_found_as_item(err: StoreError) -> ServiceError {
    match err {
        StoreError::NotFound => ServiceError::not_found(ITEM_NOT_FOUND),
        other => other.into(),
    }
}
