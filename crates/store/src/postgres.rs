//! Postgres-backed document store.
//!
//! One `documents` table keyed by `(collection, id)` with the payload in a
//! JSONB column. Shallow merges use the `||` jsonb operator, so an update is
//! a single atomic statement; the pool is thread-safe and shared.

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::document::FieldFilter;
use crate::error::{StoreError, StoreResult};
use crate::DocumentStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id         TEXT NOT NULL,
    doc        JSONB NOT NULL,
    PRIMARY KEY (collection, id)
);
CREATE UNIQUE INDEX IF NOT EXISTS documents_users_email
    ON documents (collection, (doc->>'email'))
    WHERE collection = 'users';
"#;

/// Durable backing with the same observable semantics as [`crate::MemoryStore`].
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database and install the schema if absent.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(backend)?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema install: the documents table plus the users email
    /// uniqueness index.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        tracing::debug!("document store schema ready");
        Ok(())
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, id: &str, doc: JsonValue) -> StoreResult<()> {
        let result = sqlx::query("INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(&doc)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateKey(format!("{collection}/{id}")))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<JsonValue> {
        let doc: Option<JsonValue> =
            sqlx::query_scalar("SELECT doc FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        doc.ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonMap<String, JsonValue>,
    ) -> StoreResult<JsonValue> {
        let patch = JsonValue::Object(fields);

        let result = sqlx::query_scalar(
            "UPDATE documents SET doc = doc || $3 WHERE collection = $1 AND id = $2 RETURNING doc",
        )
        .bind(collection)
        .bind(id)
        .bind(&patch)
        .fetch_optional(&self.pool)
        .await;

        let doc: Option<JsonValue> = match result {
            Ok(doc) => doc,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(StoreError::DuplicateKey(format!("{collection}/{id}")));
            }
            Err(e) => return Err(backend(e)),
        };

        doc.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<JsonValue> {
        let doc: Option<JsonValue> = sqlx::query_scalar(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING doc",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        doc.ok_or(StoreError::NotFound)
    }

    async fn list(&self, collection: &str, filter: Option<FieldFilter>) -> StoreResult<Vec<JsonValue>> {
        let docs: Vec<JsonValue> = match filter {
            None => {
                sqlx::query_scalar(
                    "SELECT doc FROM documents WHERE collection = $1 ORDER BY id",
                )
                .bind(collection)
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?
            }
            Some(f) => {
                sqlx::query_scalar(
                    "SELECT doc FROM documents \
                     WHERE collection = $1 AND doc -> $2 = $3 ORDER BY id",
                )
                .bind(collection)
                .bind(&f.field)
                .bind(&f.value)
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?
            }
        };

        Ok(docs)
    }

    async fn find_by(
        &self,
        collection: &str,
        field: &str,
        value: &JsonValue,
    ) -> StoreResult<Option<JsonValue>> {
        sqlx::query_scalar(
            "SELECT doc FROM documents \
             WHERE collection = $1 AND doc -> $2 = $3 ORDER BY id LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
