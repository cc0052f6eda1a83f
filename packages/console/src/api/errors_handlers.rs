// ABOUTME: HTTP handlers for the client error log sink

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use crate::db::DbState;
use crate::errors::ErrorLogInput;

pub async fn list_errors(State(state): State<DbState>) -> Response {
    match state.error_logs.list().await {
        Ok(logs) => envelope(ApiResponse::success(logs)),
        Err(e) => storage_failure(&state, "errors.list", e).await,
    }
}

pub async fn log_error(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let input: ErrorLogInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.error_logs.record(input).await {
        Ok(()) => ok_message("Error logged successfully"),
        Err(e) => storage_failure(&state, "errors.log", e).await,
    }
}

pub async fn clear_errors(State(state): State<DbState>) -> Response {
    match state.error_logs.clear().await {
        Ok(()) => ok_message("Error logs cleared successfully"),
        Err(e) => storage_failure(&state, "errors.clear", e).await,
    }
}
