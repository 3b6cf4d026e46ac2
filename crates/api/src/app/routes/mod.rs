use axum::routing::{get, post};
use axum::Router;

pub mod analytics;
pub mod auth;
pub mod chat;
pub mod inventory;
pub mod logistics;
pub mod sensors;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/inventory", inventory::router())
        .nest("/analytics", analytics::router())
        .nest("/sensors", sensors::router())
        .route("/consumer", get(analytics::consumer))
        .route("/logistics", get(logistics::logistics))
        .route("/warehouses", get(logistics::warehouses))
        .route("/chat", post(chat::chat))
        .route("/health", get(system::health))
}
