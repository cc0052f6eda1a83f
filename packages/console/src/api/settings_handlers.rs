// ABOUTME: HTTP handlers for console settings

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use crate::db::DbState;

pub async fn get_settings(State(state): State<DbState>) -> Response {
    match state.settings.get_all().await {
        Ok(settings) => envelope(ApiResponse::success(settings)),
        Err(e) => storage_failure(&state, "settings.get", e).await,
    }
}

pub async fn update_settings(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if body.is_empty() {
        return failure("No settings data provided");
    }

    match state.settings.update(&body).await {
        Ok(()) => ok_message("Settings updated successfully"),
        Err(e) => storage_failure(&state, "settings.update", e).await,
    }
}
