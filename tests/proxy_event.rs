//! Proxy event tests
//!
//! The serverless entry point receives the request as a JSON event and must
//! answer with the same envelope and headers as the HTTP route.

mod common;

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use common::{FailingStore, FailingSynthesizer, Harness, test_config};
use speak_gateway::{AppState, ErrorStatusPolicy, ProxyEvent, ProxyResponse};

fn body_json(response: &ProxyResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn assert_cors(response: &ProxyResponse) {
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
    assert_eq!(response.headers["Access-Control-Allow-Methods"], "OPTIONS,POST");
}

#[tokio::test]
async fn test_event_success() {
    let harness = Harness::new();
    let event = ProxyEvent::with_body(r#"{"text": "Hello world"}"#);

    let response = harness.state.speak.handle_event(&event).await;

    assert_eq!(response.status_code, 200);
    assert_cors(&response);
    let body = body_json(&response);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["textLength"], 11);
    assert_eq!(body["data"]["voice"], "Joanna");
    assert_eq!(harness.object_count().await, 1);
}

#[tokio::test]
async fn test_event_from_gateway_json() {
    let harness = Harness::new();
    let event: ProxyEvent = serde_json::from_str(
        r#"{
            "resource": "/speak",
            "path": "/speak",
            "httpMethod": "POST",
            "headers": {"Content-Type": "application/json"},
            "body": "{\"text\":\"From the gateway\",\"speed\":\"x-slow\"}",
            "isBase64Encoded": false
        }"#,
    )
    .unwrap();

    let response = harness.state.speak.handle_event(&event).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        harness.synthesizer.calls()[0].text,
        r#"<speak><prosody rate="x-slow">From the gateway</prosody></speak>"#
    );
}

#[tokio::test]
async fn test_base64_event_body() {
    let harness = Harness::new();
    let event = ProxyEvent {
        http_method: Some("POST".to_string()),
        body: Some(BASE64.encode(r#"{"text": "Encoded"}"#)),
        is_base64_encoded: true,
    };

    let response = harness.state.speak.handle_event(&event).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(body_json(&response)["data"]["textLength"], 7);
}

#[tokio::test]
async fn test_event_without_body_fails() {
    let harness = Harness::new();
    let event = ProxyEvent {
        http_method: Some("POST".to_string()),
        body: None,
        is_base64_encoded: false,
    };

    let response = harness.state.speak.handle_event(&event).await;

    assert_eq!(response.status_code, 500);
    assert_cors(&response);
    let body = body_json(&response);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(harness.synthesizer.calls().is_empty());
}

#[tokio::test]
async fn test_event_with_missing_text_fails() {
    let harness = Harness::new();

    let response = harness
        .state
        .speak
        .handle_event(&ProxyEvent::with_body("{}"))
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body_json(&response)["success"], false);
}

#[tokio::test]
async fn test_event_synthesis_failure() {
    let state = AppState::with_clients(
        test_config(),
        Arc::new(FailingSynthesizer),
        Arc::new(FailingStore::default()),
    );

    let response = state
        .speak
        .handle_event(&ProxyEvent::with_body(r#"{"text": "Hi"}"#))
        .await;

    assert_eq!(response.status_code, 500);
    assert_cors(&response);
    assert!(
        body_json(&response)["error"]
            .as_str()
            .unwrap()
            .starts_with("Speech synthesis failed")
    );
}

#[tokio::test]
async fn test_event_classified_status() {
    let mut config = test_config();
    config.error_status_policy = ErrorStatusPolicy::Classified;
    let harness = Harness::with_config(config);

    let response = harness
        .state
        .speak
        .handle_event(&ProxyEvent::with_body("not json"))
        .await;

    assert_eq!(response.status_code, 400);
}

#[tokio::test]
async fn test_preflight_event() {
    let harness = Harness::new();
    let event = ProxyEvent {
        http_method: Some("OPTIONS".to_string()),
        body: None,
        is_base64_encoded: false,
    };

    let response = harness.state.speak.handle_event(&event).await;

    assert_eq!(response.status_code, 200);
    assert_cors(&response);
    assert!(response.body.is_empty());
    assert!(harness.synthesizer.calls().is_empty());
}

#[tokio::test]
async fn test_response_serializes_to_proxy_shape() {
    let harness = Harness::new();

    let response = harness
        .state
        .speak
        .handle_event(&ProxyEvent::with_body(r#"{"text": "Shape"}"#))
        .await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["statusCode"], 200);
    assert!(json["body"].is_string());
    assert_eq!(json["headers"]["Access-Control-Allow-Origin"], "*");
}
