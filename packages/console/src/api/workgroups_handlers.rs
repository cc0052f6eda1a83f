// ABOUTME: HTTP handlers for workgroup CRUD

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::{extract_id, validate_required};
use crate::db::DbState;
use crate::storage::{DeleteOutcome, StorageError};
use crate::workgroups::WorkgroupCreateInput;

pub async fn list_workgroups(State(state): State<DbState>) -> Response {
    match state.workgroups.list().await {
        Ok(workgroups) => envelope(ApiResponse::success(workgroups)),
        Err(e) => storage_failure(&state, "workgroups.list", e).await,
    }
}

pub async fn create_workgroup(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(&body, &["name", "goal"]) {
        return failure(error);
    }

    let input: WorkgroupCreateInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.workgroups.create(input).await {
        Ok(workgroup) => envelope(ApiResponse::success_with_message(
            workgroup,
            "Workgroup created successfully",
        )),
        Err(e) => storage_failure(&state, "workgroups.create", e).await,
    }
}

pub async fn update_workgroup(
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

    match state.workgroups.update(id, &body).await {
        Ok(Some(workgroup)) => envelope(ApiResponse::success_with_message(
            workgroup,
            "Workgroup updated successfully",
        )),
        Ok(None) => failure("Workgroup not found"),
        Err(StorageError::NoFieldsToUpdate) => failure("No fields to update"),
        Err(e) => storage_failure(&state, "workgroups.update", e).await,
    }
}

pub async fn delete_workgroup(
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

    match state.workgroups.delete(id).await {
        Ok(DeleteOutcome::Deleted) => ok_message("Workgroup deleted successfully"),
        Ok(DeleteOutcome::NotFound) => failure("Workgroup not found"),
        Ok(DeleteOutcome::Blocked) => failure(
            "Cannot delete workgroup with active tasks. Please complete or reassign tasks first.",
        ),
        Err(e) => storage_failure(&state, "workgroups.delete", e).await,
    }
}
