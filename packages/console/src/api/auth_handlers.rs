// ABOUTME: HTTP handlers for login, session verification, and logout

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::auth::bearer_token;
use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::validate_required;
use crate::auth::{LoginInput, LoginOutcome};
use crate::db::DbState;

pub async fn login(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(&body, &["username", "password"]) {
        return failure(error);
    }

    let input: LoginInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.auth.login(&input.username, &input.password).await {
        Ok(LoginOutcome::Success(session)) => {
            envelope(ApiResponse::success_with_message(session, "Login successful"))
        }
        Ok(LoginOutcome::InvalidCredentials) => failure("Invalid credentials"),
        Ok(LoginOutcome::AccountDisabled) => failure("Account is disabled"),
        Err(e) => storage_failure(&state, "auth.login", e).await,
    }
}

pub async fn verify(State(state): State<DbState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return failure("Authorization token required");
    };

    match state.auth.verify(&token).await {
        Ok(Some(session)) => envelope(ApiResponse::success(session)),
        Ok(None) => failure("Invalid or expired session"),
        Err(e) => storage_failure(&state, "auth.verify", e).await,
    }
}

pub async fn logout(State(state): State<DbState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return failure("Authorization token required");
    };

    match state.auth.logout(&token).await {
        Ok(()) => ok_message("Logout successful"),
        Err(e) => storage_failure(&state, "auth.logout", e).await,
    }
}
