//! Helpers for driving the router in tests.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use store_db::{new_product, Database, DbConfig};
use tower::ServiceExt;

use crate::{router, AppState};

/// Fresh in-memory database with one product, `Cola 330ml` (10 in stock).
///
/// Returns the database and that product's id.
pub async fn seeded_db() -> (Database, String) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let cola = db
        .products()
        .insert(&new_product("Cola 330ml", 10, 250, 180))
        .await
        .unwrap();
    (db, cola.id)
}

pub fn app(state: AppState) -> Router {
    router(state, Duration::from_secs(5))
}

/// Sends one request and returns the status and the decoded JSON envelope.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Sends a raw (possibly malformed) JSON body.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
