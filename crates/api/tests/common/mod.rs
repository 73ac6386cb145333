#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use gradebook_db::store::{MemoryStudentStore, StudentStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gradebook_api::config::{ServerConfig, StorageBackend};
use gradebook_api::router::build_app_router;
use gradebook_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        storage: StorageBackend::Memory,
        ..ServerConfig::default()
    }
}

/// Build the full application router over `store`.
///
/// Goes through the same [`build_app_router`] as `main.rs`, so tests see
/// the production middleware stack.
pub fn build_test_app_with(store: Arc<dyn StudentStore>) -> Router {
    build_app_router(AppState::new(store, test_config()))
}

/// Router over a fresh, empty in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStudentStore::new()))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
