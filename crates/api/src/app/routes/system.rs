use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use agrovault_core::now_iso;

use crate::app::services::AppServices;

/// Health check: reports store reachability and the current time.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let database = if services.store_reachable().await {
        "connected"
    } else {
        "disconnected"
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "time": now_iso(),
            "database": database,
        })),
    )
        .into_response()
}
