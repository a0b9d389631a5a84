//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use contentflow_api::config::ServerConfig;
use contentflow_api::router::build_app_router;
use contentflow_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the production router on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

/// POST without a body, for endpoints whose body is optional.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const BODY: &str = "Spring is here. Our new collection is built for longer days.";

pub fn editor() -> Value {
    json!({ "id": "editor-42", "name": "Robin Editor", "role": "editor" })
}

/// Create a campaign and a blog post in it over HTTP; returns the piece id.
pub async fn create_piece(pool: &PgPool) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/campaigns",
        json!({ "name": "Spring" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let campaign_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/content",
        json!({
            "campaign_id": campaign_id,
            "content_type": "blog_post",
            "source_language": "en",
            "target_language": "de",
            "title": "Spring launch",
            "description": "Seasonal teaser",
            "original_content": BODY,
            "created_by": "author-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Submit then approve a piece over HTTP.
pub async fn approve_piece(pool: &PgPool, id: i64) {
    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/content/{id}/submit"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/content/{id}/approve"),
        json!({ "reviewer": editor() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
