use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use agrovault_core::ServiceResult;
use serde_json::Value as JsonValue;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/trends", get(trends))
        .route("/loss", get(loss))
        .route("/consumer", get(consumer_stats))
        .route("/full", get(full))
}

fn respond(result: ServiceResult<JsonValue>) -> axum::response::Response {
    match result {
        Ok(doc) => (StatusCode::OK, Json(doc)).into_response(),
        Err(e) => errors::error_response(e),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    respond(services.snapshots.dashboard().await)
}

pub async fn trends(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    respond(services.snapshots.storage_trends().await)
}

pub async fn loss(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    respond(services.snapshots.loss_analysis().await)
}

pub async fn consumer_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    respond(services.snapshots.consumer_stats().await)
}

pub async fn full(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    respond(services.snapshots.analytics().await)
}

/// `GET /api/consumer` — full consumer data document (mounted outside the
/// `/analytics` subtree).
pub async fn consumer(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    respond(services.snapshots.consumer().await)
}
