// ABOUTME: Integration tests for the error log sink

mod common;

use common::{app, get, send_json, setup_state};
use serde_json::json;

#[tokio::test]
async fn log_applies_defaults_for_missing_fields() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (status, body) = send_json(&app, "POST", "/api/errors/log", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Error logged successfully"));

    let (_, body) = get(&app, "/api/errors").await;
    let entry = &body["data"][0];
    assert_eq!(entry["type"], json!("unknown"));
    assert_eq!(entry["severity"], json!("medium"));
    assert_eq!(entry["message"], json!("No message"));
}

#[tokio::test]
async fn log_records_client_fields() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    send_json(
        &app,
        "POST",
        "/api/errors/log",
        json!({
            "type": "ui",
            "severity": "low",
            "message": "button misrendered",
            "stack_trace": "at render()",
            "source": "dashboard"
        }),
    )
    .await;

    let (_, body) = get(&app, "/api/errors").await;
    let entry = &body["data"][0];
    assert_eq!(entry["type"], json!("ui"));
    assert_eq!(entry["severity"], json!("low"));
    assert_eq!(entry["stack_trace"], json!("at render()"));
    assert_eq!(entry["source"], json!("dashboard"));
}

#[tokio::test]
async fn malformed_body_yields_envelope_error() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/errors/log")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (_, body) = common::dispatch(&app, request).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn clear_truncates_the_log() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    send_json(&app, "POST", "/api/errors/log", json!({"message": "one"})).await;
    send_json(&app, "POST", "/api/errors/log", json!({"message": "two"})).await;

    let (_, body) = send_json(&app, "POST", "/api/errors/clear", json!({})).await;
    assert_eq!(body["success"], json!(true));

    let (_, body) = get(&app, "/api/errors").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
