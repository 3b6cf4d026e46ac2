//! Demo-data loader.
//!
//! Populates the configured store with demo accounts, sample inventory and
//! alerts, and the singleton snapshot documents the read-only endpoints
//! serve. Idempotent: existing documents are replaced, not duplicated.
//!
//! Usage: `DATABASE_URL=... agrovault-seed` (no URL seeds the in-memory
//! store, which only makes sense as a smoke test).

use std::sync::Arc;

use serde_json::{Value as JsonValue, json};

use agrovault_api::config::ApiConfig;
use agrovault_core::now_iso;
use agrovault_identity::hash_password;
use agrovault_store::{DocumentStore, MemoryStore, PostgresStore, StoreError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agrovault_observability::init();

    let config = ApiConfig::from_env();
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PostgresStore::connect(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set; seeding a transient in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    seed(store.as_ref()).await?;
    tracing::info!("seed complete");
    Ok(())
}

/// Drop-then-insert for one document.
async fn replace(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    doc: JsonValue,
) -> anyhow::Result<()> {
    match store.delete(collection, id).await {
        Ok(_) | Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }
    store.insert(collection, id, doc).await?;
    Ok(())
}

async fn seed(store: &dyn DocumentStore) -> anyhow::Result<()> {
    // Demo accounts with properly hashed credentials.
    for (id, name, email, password, role) in [
        ("demo-admin", "Admin Manager", "admin@agrovault.io", "admin123", "warehouse"),
        ("demo-consumer", "Niket Farmer", "niket@farm.io", "farmer123", "consumer"),
    ] {
        replace(
            store,
            "users",
            id,
            json!({
                "_id": id,
                "name": name,
                "email": email,
                "password": hash_password(password)?,
                "role": role,
            }),
        )
        .await?;
    }
    tracing::info!("users: 2 docs");

    let checked = now_iso();
    let items = [
        ("inv-wheat", "Wheat", "Grains", "Silo A", 120.0, 21.5, 58.0),
        ("inv-rice", "Rice", "Grains", "Silo B", 85.0, 22.0, 61.0),
        ("inv-maize", "Maize", "Grains", "Silo C", 64.0, 23.1, 55.0),
        ("inv-apples", "Apples", "Fruits", "Cold Store 1", 12.5, 4.0, 88.0),
    ];
    for (id, name, category, location, quantity, temperature, humidity) in items {
        replace(
            store,
            "inventory",
            id,
            json!({
                "_id": id,
                "name": name,
                "category": category,
                "location": location,
                "quantity": quantity,
                "unit": "tons",
                "qualityStatus": "Good",
                "lastChecked": checked,
                "temperature": temperature,
                "humidity": humidity,
            }),
        )
        .await?;
    }
    tracing::info!("inventory: {} docs", items.len());

    let alerts = [
        ("alert-1", "high", "Temperature spike in Silo B", "temperature"),
        ("alert-2", "medium", "Humidity above threshold in Cold Store 1", "humidity"),
        ("alert-3", "low", "Routine quality inspection due", "maintenance"),
    ];
    for (id, severity, message, kind) in alerts {
        replace(
            store,
            "alerts",
            id,
            json!({
                "_id": id,
                "severity": severity,
                "message": message,
                "type": kind,
                "acknowledged": false,
                "createdAt": checked,
            }),
        )
        .await?;
    }
    tracing::info!("alerts: {} docs", alerts.len());

    replace(
        store,
        "sensor_readings",
        "current",
        json!({
            "_id": "current",
            "temperature": {"value": 22.4, "unit": "°C"},
            "humidity": {"value": 61.0, "unit": "%"},
            "co2": {"value": 410, "unit": "ppm"},
            "updatedAt": checked,
        }),
    )
    .await?;

    replace(
        store,
        "dashboard_stats",
        "current",
        json!({
            "_id": "current",
            "totalStock": 281.5,
            "capacityUsedPct": 68,
            "activeAlerts": 3,
            "monthlyThroughput": 342.0,
        }),
    )
    .await?;

    replace(
        store,
        "analytics",
        "current",
        json!({
            "_id": "current",
            "storageTrends": [
                {"month": "Jun", "utilization": 61},
                {"month": "Jul", "utilization": 66},
                {"month": "Aug", "utilization": 68},
            ],
            "lossAnalysis": [
                {"cause": "moisture", "pct": 1.4},
                {"cause": "pests", "pct": 0.6},
            ],
        }),
    )
    .await?;

    replace(
        store,
        "consumer_data",
        "current",
        json!({
            "_id": "current",
            "stats": {"orders": 18, "pendingDeliveries": 3, "avgLeadDays": 2.4},
            "recentOrders": [
                {"id": "ord-101", "item": "Wheat", "quantity": 2.0, "status": "delivered"},
                {"id": "ord-102", "item": "Rice", "quantity": 1.5, "status": "in-transit"},
            ],
        }),
    )
    .await?;

    replace(
        store,
        "logistics",
        "current",
        json!({
            "_id": "current",
            "inboundShipments": 2,
            "outboundShipments": 5,
            "fleet": [{"vehicle": "TRK-7", "status": "en-route", "eta": "2h"}],
        }),
    )
    .await?;

    for (id, fill) in [("silo-a", 0.82), ("silo-b", 0.57), ("silo-c", 0.44)] {
        replace(
            store,
            "silo_status",
            id,
            json!({"_id": id, "id": id, "fillLevel": fill, "status": "ok"}),
        )
        .await?;
    }

    for (id, name, city) in [
        ("wh-central", "Central Grain Hub", "Nashik"),
        ("wh-north", "North Cold Storage", "Chandigarh"),
    ] {
        replace(
            store,
            "warehouses",
            id,
            json!({"_id": id, "name": name, "city": city, "capacityTons": 500}),
        )
        .await?;
    }

    tracing::info!("snapshot documents seeded");
    Ok(())
}
