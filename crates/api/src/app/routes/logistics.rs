use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn logistics(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.snapshots.logistics().await {
        Ok(doc) => (StatusCode::OK, Json(doc)).into_response(),
        Err(e) => errors::error_response(e),
    }
}

pub async fn warehouses(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.snapshots.warehouses().await {
        Ok(docs) => (StatusCode::OK, Json(docs)).into_response(),
        Err(e) => errors::error_response(e),
    }
}
