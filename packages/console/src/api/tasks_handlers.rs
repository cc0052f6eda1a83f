// ABOUTME: HTTP handlers for task CRUD

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::{extract_id, validate_required};
use crate::db::DbState;
use crate::storage::{DeleteOutcome, StorageError};
use crate::tasks::TaskCreateInput;

pub async fn list_tasks(State(state): State<DbState>) -> Response {
    match state.tasks.list().await {
        Ok(tasks) => envelope(ApiResponse::success(tasks)),
        Err(e) => storage_failure(&state, "tasks.list", e).await,
    }
}

pub async fn create_task(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(&body, &["title", "description"]) {
        return failure(error);
    }

    let input: TaskCreateInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.tasks.create(input).await {
        Ok(id) => envelope(ApiResponse::success_with_message(
            json!({ "id": id }),
            "Task created successfully",
        )),
        Err(e) => storage_failure(&state, "tasks.create", e).await,
    }
}

pub async fn update_task(
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

    match state.tasks.update(id, &body).await {
        Ok(rows) if rows > 0 => ok_message("Task updated successfully"),
        Ok(_) => failure("Task not found or no changes made"),
        Err(StorageError::NoFieldsToUpdate) => failure("No fields to update"),
        Err(e) => storage_failure(&state, "tasks.update", e).await,
    }
}

pub async fn delete_task(
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

    match state.tasks.delete(id).await {
        Ok(DeleteOutcome::Deleted) => ok_message("Task deleted successfully"),
        Ok(_) => failure("Task not found"),
        Err(e) => storage_failure(&state, "tasks.delete", e).await,
    }
}
