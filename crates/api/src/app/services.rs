//! Service context: explicitly constructed, injected into handlers.
//!
//! Backing-store substitution (durable vs. in-memory) and model-client
//! availability are constructor-time choices here, never ambient globals.

use std::sync::Arc;

use agrovault_alerts::AlertService;
use agrovault_assistant::{ChatGateway, GeminiClient, ModelClient};
use agrovault_identity::IdentityService;
use agrovault_inventory::InventoryService;
use agrovault_snapshots::SnapshotService;
use agrovault_store::{DocumentStore, MemoryStore, PostgresStore};

use crate::config::ApiConfig;

pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    pub identity: IdentityService,
    pub inventory: InventoryService,
    pub alerts: AlertService,
    pub snapshots: SnapshotService,
    pub gateway: ChatGateway,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, gateway: ChatGateway) -> Self {
        Self {
            identity: IdentityService::new(store.clone()),
            inventory: InventoryService::new(store.clone()),
            alerts: AlertService::new(store.clone()),
            snapshots: SnapshotService::new(store.clone()),
            gateway,
            store,
        }
    }

    /// Transient services with no model client (tests, dev default).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), ChatGateway::unconfigured())
    }

    /// Store reachability, reported by the health endpoint.
    pub async fn store_reachable(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

/// Wire up the context from configuration.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url).await?;
            tracing::info!("document store backing: postgres");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using transient in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let gateway = match &config.model_api_key {
        Some(key) => {
            let client: Arc<dyn ModelClient> = Arc::new(GeminiClient::new(key.clone())?);
            ChatGateway::new(Some(client))
        }
        None => {
            tracing::warn!("no model API key set; chat gateway unconfigured");
            ChatGateway::unconfigured()
        }
    };

    Ok(AppServices::new(store, gateway))
}
