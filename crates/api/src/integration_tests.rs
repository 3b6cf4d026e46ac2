//! End-to-end tests over the assembled router with the in-memory backing.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

use agrovault_assistant::{ChatGateway, ModelClient, ModelReply, Prompt};
use agrovault_core::ServiceResult;
use agrovault_store::{DocumentStore, MemoryStore};

use crate::app::services::AppServices;
use crate::app::build_app;

struct StubModel {
    reply: ModelReply,
}

#[async_trait]
impl ModelClient for StubModel {
    async fn generate(&self, _prompt: &Prompt) -> ServiceResult<ModelReply> {
        Ok(self.reply.clone())
    }
}

fn app_with_stub_model(store: Arc<MemoryStore>, reply: ModelReply) -> Router {
    let gateway = ChatGateway::new(Some(Arc::new(StubModel { reply })));
    build_app(Arc::new(AppServices::new(store, gateway)))
}

fn app_in_memory() -> Router {
    build_app(Arc::new(AppServices::in_memory()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_store_and_time() {
    let app = app_in_memory();
    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["time"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn signup_then_duplicate_then_login() {
    let app = app_in_memory();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/signup",
        Some(json!({"name": "Alice", "email": "alice@farm.io", "password": "pw", "role": "warehouse"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "alice@farm.io");
    assert_eq!(body["user"]["role"], "warehouse");
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().unwrap().starts_with("token-"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/signup",
        Some(json!({"name": "Alice", "email": "alice@farm.io", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");

    // Login with a different password still succeeds (self-healing policy).
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "alice@farm.io", "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_provisions_unknown_email() {
    let app = app_in_memory();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "newcomer@farm.io", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "consumer");
    assert_eq!(body["user"]["name"], "Newcomer");
}

#[tokio::test]
async fn login_without_email_is_bad_request() {
    let app = app_in_memory();
    let (status, body) = send(&app, "POST", "/api/auth/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is required");
}

#[tokio::test]
async fn inventory_crud_roundtrip() {
    let app = app_in_memory();

    let (status, created) = send(
        &app,
        "POST",
        "/api/inventory",
        Some(json!({"name": "Wheat", "category": "Grains", "quantity": 120})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["unit"], "tons");
    assert_eq!(created["qualityStatus"], "Good");
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/api/inventory?category=Grains", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/inventory/{id}"),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 5.0);
    assert_eq!(updated["name"], "Wheat");

    let (status, deleted) = send(&app, "DELETE", &format!("/api/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"]["_id"], id.as_str());

    let (status, body) = send(&app, "GET", &format!("/api/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn alert_acknowledge_over_http() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert(
            "alerts",
            "a1",
            json!({"_id": "a1", "severity": "high", "acknowledged": false}),
        )
        .await
        .unwrap();
    let app = build_app(Arc::new(AppServices::new(
        store,
        ChatGateway::unconfigured(),
    )));

    let (status, body) = send(&app, "PUT", "/api/sensors/alerts/a1/acknowledge", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alert acknowledged");

    let (_, alerts) = send(&app, "GET", "/api/sensors/alerts?severity=high", None).await;
    let alert = &alerts.as_array().unwrap()[0];
    assert_eq!(alert["acknowledged"], true);
    assert!(alert["acknowledgedAt"].as_str().is_some());

    let (status, body) = send(&app, "PUT", "/api/sensors/alerts/nope/acknowledge", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Alert not found");
}

#[tokio::test]
async fn unseeded_snapshots_read_as_empty() {
    let app = app_in_memory();

    let (status, trends) = send(&app, "GET", "/api/analytics/trends", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trends, json!([]));

    let (status, dashboard) = send(&app, "GET", "/api/analytics/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard, json!({}));

    let (status, warehouses) = send(&app, "GET", "/api/warehouses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(warehouses, json!([]));
}

#[tokio::test]
async fn chat_relays_reply_from_model() {
    let app = app_with_stub_model(Arc::new(MemoryStore::new()), ModelReply::direct("hello back"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"message": "hello", "history": [{"role": "user", "content": "hi"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "hello back");
}

#[tokio::test]
async fn chat_without_message_is_bad_request() {
    let app = app_with_stub_model(Arc::new(MemoryStore::new()), ModelReply::direct("unused"));

    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"message": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Message is required");
}

#[tokio::test]
async fn chat_unconfigured_is_server_error() {
    let app = app_in_memory();

    let (status, _) = send(&app, "POST", "/api/chat", Some(json!({"message": "hello"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn chat_empty_model_reply_is_server_error() {
    let app = app_with_stub_model(Arc::new(MemoryStore::new()), ModelReply::default());

    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"message": "hello"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "No text response from model.");
}
