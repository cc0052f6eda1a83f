// ABOUTME: HTTP handlers for file metadata CRUD and multipart uploads
// ABOUTME: Uploads are validated by sniffed content type, never the client header

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::response::{envelope, failure, ok_message, parse_body, ApiResponse};
use super::storage_failure;
use super::validation::{extract_id, validate_required};
use crate::db::DbState;
use crate::files::{
    sniff_mime, AgentFileCreateInput, UploadRecord, ALLOWED_UPLOAD_TYPES, MAX_UPLOAD_SIZE,
};
use workforce_core::generate_upload_name;

#[derive(Debug, Deserialize)]
pub struct ListFilesQuery {
    pub agent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFileQuery {
    pub file_id: Option<i64>,
}

pub async fn list_files(
    State(state): State<DbState>,
    Query(query): Query<ListFilesQuery>,
) -> Response {
    let Some(agent_id) = query.agent_id else {
        return failure("Field 'agent_id' is required");
    };

    match state.files.list_for_agent(agent_id).await {
        Ok(files) => envelope(ApiResponse::success(files)),
        Err(e) => storage_failure(&state, "files.list", e).await,
    }
}

pub async fn create_file_record(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Some(error) = validate_required(
        &body,
        &["agent_id", "file_name", "file_size", "mime_type", "file_path"],
    ) {
        return failure(error);
    }

    let input: AgentFileCreateInput = match serde_json::from_value(Value::Object(body)) {
        Ok(input) => input,
        Err(e) => return failure(format!("Invalid JSON: {}", e)),
    };

    match state.files.create_metadata(input).await {
        Ok(file) => envelope(ApiResponse::success_with_message(
            file,
            "File record created successfully",
        )),
        Err(e) => storage_failure(&state, "files.create", e).await,
    }
}

pub async fn delete_file(
    State(state): State<DbState>,
    Query(query): Query<DeleteFileQuery>,
) -> Response {
    let Some(file_id) = query.file_id else {
        return failure("Field 'file_id' is required");
    };

    match state.files.delete(file_id).await {
        Ok(()) => ok_message("File deleted successfully"),
        Err(e) => storage_failure(&state, "files.delete", e).await,
    }
}

pub async fn analyze_file(
    State(state): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let Some(file_id) = extract_id(&body, "file_id") else {
        return failure("Field 'file_id' is required");
    };
    let Some(analysis) = body.get("analysis_result") else {
        return failure("Field 'analysis_result' is required");
    };

    match state.files.set_analysis(file_id, analysis).await {
        Ok(Some(file)) => envelope(ApiResponse::success_with_message(
            file,
            "Analysis saved successfully",
        )),
        Ok(None) => failure("File not found"),
        Err(e) => storage_failure(&state, "files.analyze", e).await,
    }
}

/// Multipart upload. Validation order matters: file presence, transport,
/// size, then sniffed content type; only then does anything touch disk.
pub async fn upload_file(State(state): State<DbState>, mut multipart: Multipart) -> Response {
    let mut original_name: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut agent_id: Option<i64> = None;
    let mut description = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return failure(format!("Upload failed: {}", e)),
        };

        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                original_name = field.file_name().map(|s| s.to_string());
                match field.bytes().await {
                    Ok(bytes) => content = Some(bytes.to_vec()),
                    Err(e) => return failure(format!("Upload failed: {}", e)),
                }
            }
            Some("agent_id") => {
                if let Ok(text) = field.text().await {
                    agent_id = text.trim().parse().ok();
                }
            }
            Some("description") => {
                if let Ok(text) = field.text().await {
                    description = text;
                }
            }
            _ => {}
        }
    }

    let (Some(original_name), Some(content)) = (original_name, content) else {
        return failure("No file uploaded");
    };

    if content.len() > MAX_UPLOAD_SIZE {
        return failure("File too large. Maximum size is 50MB");
    }

    let mime_type = sniff_mime(&content, &original_name);
    if !ALLOWED_UPLOAD_TYPES.contains(&mime_type.as_str()) {
        return failure("File type not allowed");
    }

    if let Err(e) = tokio::fs::create_dir_all(&state.upload_dir).await {
        error!("Failed to create upload directory: {}", e);
        return failure("Failed to save file");
    }

    let filename = generate_upload_name(&original_name);
    let file_path = state.upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&file_path, &content).await {
        error!("Failed to write upload {}: {}", file_path.display(), e);
        return failure("Failed to save file");
    }

    let record = UploadRecord {
        agent_id,
        filename,
        original_name,
        file_path: file_path.to_string_lossy().into_owned(),
        file_size: content.len() as i64,
        mime_type,
        description,
    };

    match state.files.record_upload(&record).await {
        Ok(meta) => envelope(ApiResponse::success_with_message(
            meta,
            "File uploaded successfully",
        )),
        Err(e) => storage_failure(&state, "files.upload", e).await,
    }
}
