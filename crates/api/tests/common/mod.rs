#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use monarch_db::DbPool;
use sqlx::any::AnyPoolOptions;
use tower::ServiceExt;

use monarch_api::app::build_app;
use monarch_api::config::ServerConfig;
use monarch_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the dev-default CORS origins.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ],
    }
}

/// A fresh in-memory database with the schema applied.
///
/// One connection that never expires, so every request in a test sees the
/// same database.
pub async fn test_pool() -> DbPool {
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    monarch_db::create_schema(&pool).await.unwrap();
    pool
}

/// A file-backed database built by `create_pool`, as `main.rs` builds it.
///
/// Multiple connections, so concurrent requests really contend for the
/// SQLite write lock. Keep `dir` alive for the duration of the test.
pub async fn file_pool(dir: &tempfile::TempDir) -> DbPool {
    let url = format!("sqlite://{}", dir.path().join("monarch.db").display());
    let pool = monarch_db::create_pool(&url).await.unwrap();
    monarch_db::create_schema(&pool).await.unwrap();
    pool
}

/// Build the full application router, exactly as `main.rs` does, on top of
/// the given pool.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, body).await
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(method, uri, body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
