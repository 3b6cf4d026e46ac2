//! Service error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use agrovault_core::ServiceError;

/// Map a service error to its status code and a `{"message": ...}` body.
pub fn error_response(err: ServiceError) -> axum::response::Response {
    let status = match &err {
        ServiceError::Validation(_) | ServiceError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Unconfigured(_)
        | ServiceError::Upstream(_)
        | ServiceError::EmptyReply(_)
        | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }

    json_error(status, err.to_string())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "message": message.into(),
        })),
    )
        .into_response()
}
