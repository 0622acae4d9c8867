//! Integration tests for POST /api/scan driven through the router

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rstest::rstest;
use serde_json::json;

use aegis_core::Config;
use aegis_gateway::presentation::routes::MAX_BODY_BYTES;
use aegis_llm::domain::LlmError;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{
    ScriptedProvider, create_router_with, create_test_router, json_body, scan_request, send,
};

const SNIPPET: &str = r#"import sqlite3

def get_user(user_id):
    conn = sqlite3.connect("app.db")
    cursor = conn.cursor()
    query = "SELECT * FROM users WHERE id = '" + user_id + "'"
    cursor.execute(query)
    row = cursor.fetchone()
    conn.close()
    return row"#;

fn code_scan_body(auto_remediation: bool) -> String {
    json!({
        "target": SNIPPET,
        "targetType": "CODE",
        "settings": { "deepThinking": false, "autoRemediation": auto_remediation }
    })
    .to_string()
}

/// Remediation disabled: the returned finding carries no codeFix at all
#[tokio::test]
async fn test_scan_without_auto_remediation_omits_code_fix() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(&code_scan_body(false), "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let findings = body["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["id"], "AEGIS-001");
    assert_eq!(findings[0]["severity"], "HIGH");
    assert_eq!(findings[0]["cweId"], "CWE-89");
    assert!(findings[0].get("codeFix").is_none());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_scan_with_auto_remediation_returns_code_fix() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(&code_scan_body(true), "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["findings"][0]["codeFix"].is_string());
}

/// The 11th request in a window is throttled before the provider is called
#[tokio::test]
async fn test_eleventh_request_is_rate_limited() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    for i in 1..=10 {
        let response = send(&router, scan_request(&code_scan_body(false), "198.51.100.4")).await;
        assert_eq!(response.status(), StatusCode::OK, "request {i} should be admitted");
    }
    assert_eq!(provider.calls(), 10);

    let response = send(&router, scan_request(&code_scan_body(false), "198.51.100.4")).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    let retry_after: u64 = response.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Too many requests. Please try again later." })
    );
    assert_eq!(provider.calls(), 10);
}

#[tokio::test]
async fn test_identities_do_not_share_quota() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    for _ in 0..10 {
        send(&router, scan_request(&code_scan_body(false), "198.51.100.4")).await;
    }
    let throttled = send(&router, scan_request(&code_scan_body(false), "198.51.100.4")).await;
    assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);

    // Only the first forwarded entry identifies the caller
    let other = send(
        &router,
        scan_request(&code_scan_body(false), "192.0.2.55, 198.51.100.4"),
    )
    .await;
    assert_eq!(other.status(), StatusCode::OK);
}

/// Rejected-at-validation requests still count against the window
#[tokio::test]
async fn test_rate_limit_runs_before_validation() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    for _ in 0..10 {
        let response = send(&router, scan_request("{not json", "198.51.100.9")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = send(&router, scan_request(&code_scan_body(false), "198.51.100.9")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_rate_limit_disabled_admits_everything() {
    let provider = Arc::new(ScriptedProvider::new());
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    let router = create_router_with(provider.clone(), false, config);

    for _ in 0..12 {
        let response = send(&router, scan_request(&code_scan_body(false), "198.51.100.4")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(provider.calls(), 12);
}

#[rstest]
#[case("{not json", "Invalid request body")]
#[case("[1, 2, 3]", "Invalid request body")]
#[case(r#"{"targetType": "CODE"}"#, "Target is required and must be a string")]
#[case(r#"{"target": 42, "targetType": "CODE"}"#, "Target is required and must be a string")]
#[case(r#"{"target": "   ", "targetType": "CODE"}"#, "Target must not be empty")]
#[case(
    r#"{"target": "x", "targetType": "SQL"}"#,
    "Invalid targetType. Must be CODE, WEB_APP, or NETWORK"
)]
#[case(
    r#"{"target": "x", "targetType": "code"}"#,
    "Invalid targetType. Must be CODE, WEB_APP, or NETWORK"
)]
#[tokio::test]
async fn test_validation_failures(#[case] body: &str, #[case] expected: &str) {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": expected }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_target_too_long() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());
    let body = json!({ "target": "a".repeat(50_001), "targetType": "CODE" }).to_string();

    let response = send(&router, scan_request(&body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Target exceeds maximum length of 50000 characters"
    );
}

#[tokio::test]
async fn test_target_at_limit_is_accepted() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());
    let body = json!({ "target": "a".repeat(50_000), "targetType": "CODE" }).to_string();

    let response = send(&router, scan_request(&body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// Escaped multi-byte targets at the character limit fit under the body ceiling
#[rstest]
#[case("\\u00e9")]
#[case("\\ud83d\\ude00")]
#[tokio::test]
async fn test_escaped_target_at_limit_is_accepted(#[case] escaped_char: &str) {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());
    let body = format!(
        r#"{{"target": "{}", "targetType": "CODE", "settings": {{"deepThinking": true, "autoRemediation": true}}}}"#,
        escaped_char.repeat(50_000)
    );
    assert!(body.len() <= MAX_BODY_BYTES);

    let response = send(&router, scan_request(&body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.calls(), 1);
}

/// A body over the ceiling is a JSON validation error, not a bare 413
#[tokio::test]
async fn test_oversized_body_is_json_bad_request() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());
    let body = json!({ "target": "a".repeat(MAX_BODY_BYTES), "targetType": "CODE" }).to_string();

    let response = send(&router, scan_request(&body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Target exceeds maximum length of 50000 characters" })
    );
    assert_eq!(provider.calls(), 0);
}

/// Throttling still wins over an oversized body
#[tokio::test]
async fn test_oversized_body_still_rate_limited() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());
    let body = json!({ "target": "a".repeat(MAX_BODY_BYTES), "targetType": "CODE" }).to_string();

    for _ in 0..10 {
        send(&router, scan_request(&body, "203.0.113.9")).await;
    }
    let response = send(&router, scan_request(&body, "203.0.113.9")).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[rstest]
#[case("GET")]
#[case("PUT")]
#[case("DELETE")]
#[tokio::test]
async fn test_wrong_method(#[case] method: &str) {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_test_router(provider.clone());

    let request = Request::builder()
        .method(method)
        .uri("/api/scan")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Method not allowed" })
    );
}

#[tokio::test]
async fn test_missing_credential_is_configuration_error() {
    let provider = Arc::new(ScriptedProvider::new());
    let router = create_router_with(provider.clone(), true, Config::default());

    let response = send(&router, scan_request(&code_scan_body(false), "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Server configuration error" }));
    assert!(!body.to_string().contains("GEMINI_API_KEY"));
    assert_eq!(provider.calls(), 0);
}

#[rstest]
#[case(|| LlmError::upstream(500, "internal trace: worker-7 crashed"), 502, "Failed to complete scan with AI provider")]
#[case(|| LlmError::auth("API key not valid"), 502, "Failed to complete scan with AI provider")]
#[case(|| LlmError::network("connection refused"), 502, "Failed to complete scan with AI provider")]
#[case(|| LlmError::timeout(110), 502, "Failed to complete scan with AI provider")]
#[case(|| LlmError::rate_limited_with_retry("RESOURCE_EXHAUSTED", 30), 429, "AI provider rate limit reached. Please try again later.")]
#[tokio::test]
async fn test_upstream_failures(
    #[case] error: fn() -> LlmError,
    #[case] status: u16,
    #[case] expected: &str,
) {
    let provider = Arc::new(ScriptedProvider::failing(error));
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(&code_scan_body(true), "203.0.113.7")).await;

    assert_eq!(response.status().as_u16(), status);
    assert_eq!(json_body(response).await, json!({ "error": expected }));
    // Never retried
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_malformed_upstream_output() {
    let provider = Arc::new(ScriptedProvider::returning(
        "Here are the findings: {\"findings\": [",
    ));
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(&code_scan_body(true), "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "AI provider returned malformed results" })
    );
}

#[tokio::test]
async fn test_fenced_upstream_output_is_accepted() {
    let provider = Arc::new(ScriptedProvider::returning(
        "```json\n{\"findings\": [{\"title\": \"Exposed .git directory\", \"severity\": \"medium\"}]}\n```",
    ));
    let router = create_test_router(provider.clone());
    let body = json!({ "target": "https://shop.example.com", "targetType": "WEB_APP" }).to_string();

    let response = send(&router, scan_request(&body, "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["findings"][0]["id"], "AEGIS-001");
    assert_eq!(body["findings"][0]["severity"], "MEDIUM");
    assert_eq!(body["findings"][0]["cweId"], "N/A");
    assert_eq!(body["findings"][0]["references"], json!([]));
}

/// A panic below the handler becomes the generic JSON 500
#[tokio::test]
async fn test_panic_is_internal_error() {
    let provider = Arc::new(ScriptedProvider::failing(|| panic!("provider state corrupted")));
    let router = create_test_router(provider.clone());

    let response = send(&router, scan_request(&code_scan_body(true), "203.0.113.7")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert!(!body.to_string().contains("corrupted"));
}
