//! Router-level tests for `POST /simplify` with an injected mock provider.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use simplify_service::services::prompt::{
    DISCLAIMER_HTML, EMPTY_SCROLL_MESSAGE, PERSONA_PROMPT, UPSTREAM_FAILURE_MESSAGE,
};
use simplify_service::services::providers::mock::MockTextProvider;
use simplify_service::services::providers::unconfigured::UnconfiguredTextProvider;
use simplify_service::startup::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app(provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(provider))
}

async fn post_simplify(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/simplify")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, body)
}

#[tokio::test]
async fn simplify_returns_disclaimer_then_generated_text() {
    let provider = Arc::new(MockTextProvider::replying(
        "Your iron levels are a bit low...",
    ));

    let (status, body) =
        post_simplify(app(provider.clone()), r#"{"text": "Hemoglobin: 9.2 g/dL"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "simplified_text": format!("{}Your iron levels are a bit low...", DISCLAIMER_HTML)
        })
    );
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn simplify_calls_provider_once_with_persona_then_text() {
    let provider = Arc::new(MockTextProvider::replying("ok"));
    let text = "  WBC 11.2 x10^9/L (H)\nCRP: 14 mg/L  ";

    let (status, _) = post_simplify(app(provider.clone()), &json!({ "text": text }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.calls(),
        vec![vec![PERSONA_PROMPT.to_string(), text.to_string()]]
    );
}

#[tokio::test]
async fn missing_text_is_rejected_without_provider_call() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let (status, body) = post_simplify(app(provider.clone()), "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Please provide a Scroll of Findings." }));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn empty_and_null_text_are_rejected_without_provider_call() {
    for payload in [r#"{"text": ""}"#, r#"{"text": null}"#] {
        let provider = Arc::new(MockTextProvider::replying("unused"));

        let (status, body) = post_simplify(app(provider.clone()), payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({ "error": EMPTY_SCROLL_MESSAGE }));
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn whitespace_text_is_forwarded() {
    let provider = Arc::new(MockTextProvider::replying("Nothing to worry about."));

    let (status, _) = post_simplify(app(provider.clone()), r#"{"text": "   "}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn provider_failure_returns_generic_error() {
    let provider = Arc::new(MockTextProvider::failing(
        "403 PERMISSION_DENIED: API key AIzaSy-leaked is invalid",
    ));

    let (status, body) = post_simplify(app(provider.clone()), r#"{"text": "abc"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "The Wizard could not read the scroll (API Error)." })
    );
    assert_eq!(body["error"], UPSTREAM_FAILURE_MESSAGE);
    assert!(!body.to_string().contains("AIzaSy"));
    assert!(body.get("simplified_text").is_none());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let (status, body) = post_simplify(app(provider.clone()), r#"{"text": "#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn non_string_text_is_a_client_error() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let (status, _) = post_simplify(app(provider.clone()), r#"{"text": 42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let provider = Arc::new(MockTextProvider::replying("unused"));

    let response = app(provider.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/simplify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let provider = Arc::new(MockTextProvider::replying("ok"));

    let response = app(provider)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/simplify")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-request-id", "req-42")
                .body(Body::from(r#"{"text": "ALT 80 U/L"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn unconfigured_provider_yields_generic_error_and_not_ready() {
    let app = build_router(AppState::new(Arc::new(UnconfiguredTextProvider::new(
        "gemini-2.5-flash",
        "Gemini API key not configured",
    ))));

    let (status, body) = post_simplify(app.clone(), r#"{"text": "Hemoglobin: 9.2 g/dL"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": UPSTREAM_FAILURE_MESSAGE }));
    assert!(!body.to_string().contains("not configured"));

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Service unavailable" }));
}
