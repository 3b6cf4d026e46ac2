use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/readings", get(readings))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/acknowledge", put(acknowledge_alert))
        .route("/silos", get(silos))
}

pub async fn readings(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.snapshots.sensor_readings().await {
        Ok(doc) => (StatusCode::OK, Json(doc)).into_response(),
        Err(e) => errors::error_response(e),
    }
}

pub async fn list_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SeverityQuery>,
) -> axum::response::Response {
    match services.alerts.list(query.severity.as_deref()).await {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(e) => errors::error_response(e),
    }
}

pub async fn acknowledge_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.alerts.acknowledge(&id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Alert acknowledged" })),
        )
            .into_response(),
        Err(e) => errors::error_response(e),
    }
}

pub async fn silos(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.snapshots.silos().await {
        Ok(docs) => (StatusCode::OK, Json(docs)).into_response(),
        Err(e) => errors::error_response(e),
    }
}
