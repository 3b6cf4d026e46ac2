use std::sync::Arc;

use agrovault_api::app;
use agrovault_api::config::ApiConfig;

#[tokio::main]
async fn main() {
    agrovault_observability::init();

    let config = ApiConfig::from_env();

    let services = app::services::build_services(&config)
        .await
        .expect("failed to build services");

    let router = app::build_app(Arc::new(services));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.unwrap();
}
