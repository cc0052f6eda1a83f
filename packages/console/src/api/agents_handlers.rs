// ABOUTME: HTTP handlers for agent CRUD

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::{extract_id, validate_required};
use crate::agents::AgentCreateInput;
use crate::db::DbState;
use crate::storage::{DeleteOutcome, StorageError};

pub async fn list_agents(State(state): State<DbState>) -> Response {
    match state.agents.list().await {
        Ok(agents) => envelope(ApiResponse::success(agents)),
        Err(e) => storage_failure(&state, "agents.list", e).await,
    }
}

pub async fn create_agent(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(&body, &["name", "role"]) {
        return failure(error);
    }

    let input: AgentCreateInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.agents.create(input).await {
        Ok(id) => envelope(ApiResponse::success_with_message(
            json!({ "id": id }),
            "Agent created successfully",
        )),
        Err(e) => storage_failure(&state, "agents.create", e).await,
    }
}

pub async fn update_agent(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let Some(id) = extract_id(&body, "id") else {
        return failure("Field 'id' is required");
    };

    match state.agents.update(id, &body).await {
        Ok(rows) if rows > 0 => ok_message("Agent updated successfully"),
        Ok(_) => failure("Agent not found"),
        Err(StorageError::NoFieldsToUpdate) => failure("No fields to update"),
        Err(e) => storage_failure(&state, "agents.update", e).await,
    }
}

pub async fn delete_agent(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let Some(id) = extract_id(&body, "id") else {
        return failure("Field 'id' is required");
    };

    match state.agents.delete(id).await {
        Ok(DeleteOutcome::Deleted) => ok_message("Agent deleted successfully"),
        Ok(DeleteOutcome::NotFound) => failure("Agent not found"),
        Ok(DeleteOutcome::Blocked) => failure(
            "Cannot delete agent with active tasks. Please reassign or complete tasks first.",
        ),
        Err(e) => storage_failure(&state, "agents.delete", e).await,
    }
}
