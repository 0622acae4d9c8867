//! Integration tests for CORS handling and the health endpoint

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use aegis_core::Config;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{ScriptedProvider, create_router_with, create_test_router, json_body, send};

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/api/scan")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_with_wildcard_origin() {
    let router = create_test_router(Arc::new(ScriptedProvider::new()));

    let response = send(&router, preflight("https://scanner.example.com")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert!(!methods.contains("GET"));

    let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert_eq!(allowed_headers, "content-type");
}

/// OPTIONS without CORS request headers reaches the handler
#[tokio::test]
async fn test_bare_options_is_empty_ok() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/scan")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert!(body.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let router = create_test_router(Arc::new(ScriptedProvider::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/api/scan")
        .header(header::ORIGIN, "https://scanner.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_fixed_origin_list() {
    let mut config = Config::default();
    config.server.allowed_origins = vec!["https://app.example.com".to_string()];
    let router = create_router_with(Arc::new(ScriptedProvider::new()), false, config);

    let allowed = send(&router, preflight("https://app.example.com")).await;
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example.com"
    );

    let rejected = send(&router, preflight("https://evil.example.net")).await;
    assert!(
        rejected
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = create_test_router(Arc::new(ScriptedProvider::new()));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let router = create_test_router(Arc::new(ScriptedProvider::new()));

    for _ in 0..15 {
        let request = Request::builder()
            .uri("/health")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&router, request).await.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = create_test_router(Arc::new(ScriptedProvider::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/scan/extra")
        .body(Body::empty())
        .unwrap();

    assert_eq!(send(&router, request).await.status(), StatusCode::NOT_FOUND);
}
