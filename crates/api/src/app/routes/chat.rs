use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn chat(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ChatRequest>,
) -> axum::response::Response {
    match services.gateway.converse(&body.message, &body.history).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reply": reply })),
        )
            .into_response(),
        Err(e) => errors::error_response(e),
    }
}
