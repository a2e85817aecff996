// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use weekplan::config::Config;
use weekplan::db::{MemoryStore, Storage};
use weekplan::routes::create_router;
use weekplan::AppState;
use std::sync::Arc;

/// Create a test app backed only by the volatile store.
/// Returns the router and the store handle for direct seeding.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let storage = Storage::with_stores(None, store.clone());
    let state = Arc::new(AppState::new(Config::default(), storage));

    (create_router(state), store)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
