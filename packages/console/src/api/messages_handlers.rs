// ABOUTME: HTTP handlers for the message read and send paths

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::response::{envelope, failure, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::validate_required;
use crate::db::DbState;
use crate::messages::{MessageFilter, MessageSendInput};

pub async fn list_messages(
    State(state): State<DbState>,
    Query(filter): Query<MessageFilter>,
) -> Response {
    match state.messages.list(&filter).await {
        Ok(page) => envelope(ApiResponse::success(page)),
        Err(e) => storage_failure(&state, "messages.list", e).await,
    }
}

pub async fn send_message(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(&body, &["content", "channel"]) {
        return failure(error);
    }

    let input: MessageSendInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.messages.send(input).await {
        Ok(message) => envelope(ApiResponse::success_with_message(
            message,
            "Message sent successfully",
        )),
        Err(e) => storage_failure(&state, "messages.send", e).await,
    }
}
