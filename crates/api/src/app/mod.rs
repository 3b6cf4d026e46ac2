//! HTTP application wiring (axum router + service context).
//!
//! Layout:
//! - `services.rs`: constructor-time backing choices (store, model client)
//! - `routes/`: handlers, one file per domain area
//! - `dto.rs`: request DTOs
//! - `errors.rs`: service error → HTTP response mapping

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(Extension(services))
}
