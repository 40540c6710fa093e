//! Integration tests for the root and health endpoints and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: GET / returns the welcome message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().starts_with("Welcome"));
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_when_pool_closed() {
    let pool = common::test_pool().await;
    pool.close().await;

    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // Generated ids are UUIDs (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn client_request_id_is_propagated() {
    let app = common::build_test_app(common::test_pool().await);
    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = common::send(app, request).await;

    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

// ---------------------------------------------------------------------------
// Test: CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_frontend_origin_with_credentials() {
    let app = common::build_test_app(common::test_pool().await);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/projects/")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "PATCH")
        .header("Access-Control-Request-Headers", "content-type,x-custom")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");

    let allow_methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(
        allow_methods.contains("PATCH"),
        "Allow-Methods should contain PATCH, got: {allow_methods}"
    );

    let allow_headers = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(
        allow_headers.contains("x-custom"),
        "Allow-Headers should mirror the request, got: {allow_headers}"
    );
}

#[tokio::test]
async fn cors_allows_loopback_origin() {
    let app = common::build_test_app(common::test_pool().await);
    let request = Request::builder()
        .uri("/")
        .header("Origin", "http://127.0.0.1:3000")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://127.0.0.1:3000"
    );
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let app = common::build_test_app(common::test_pool().await);
    let request = Request::builder()
        .uri("/")
        .header("Origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
