//! `agrovault-store` — the entity access layer.
//!
//! A key-addressed document store over named collections, with two
//! interchangeable backings behind one trait:
//! - [`MemoryStore`]: transient, for tests and credential-free dev runs.
//! - [`PostgresStore`]: durable, JSONB documents in a single table.
//!
//! The rest of the system depends only on [`DocumentStore`] and must not be
//! able to tell which backing is active.

pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;

pub use document::{Document, DocumentStoreExt, FieldFilter, unique_field};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Key-addressed collection abstraction.
///
/// All operations touch exactly one document; no multi-entity transactions.
/// `list` ordering is unspecified but stable across repeated calls against
/// unchanged data.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `doc` under `id`. Fails with [`StoreError::DuplicateKey`] if the
    /// id is taken, or if the collection declares a unique field (see
    /// [`unique_field`]) and another document already holds the same value.
    async fn insert(&self, collection: &str, id: &str, doc: JsonValue) -> StoreResult<()>;

    /// Fetch a document by id.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<JsonValue>;

    /// Shallow-merge `fields` into an existing document and return the
    /// merged result. The collection's unique field (if any) is enforced
    /// here as well: merging a value another document already holds fails
    /// with [`StoreError::DuplicateKey`].
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonMap<String, JsonValue>,
    ) -> StoreResult<JsonValue>;

    /// Remove a document and return it.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<JsonValue>;

    /// All documents in a collection, optionally narrowed by a single-field
    /// equality filter.
    async fn list(&self, collection: &str, filter: Option<FieldFilter>) -> StoreResult<Vec<JsonValue>>;

    /// First document matching a single-field equality filter, if any.
    async fn find_by(&self, collection: &str, field: &str, value: &JsonValue)
        -> StoreResult<Option<JsonValue>>;

    /// Backend reachability probe (health endpoint).
    async fn ping(&self) -> StoreResult<()>;
}
