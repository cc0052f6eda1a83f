use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file attached to an agent (metadata row, storage handled elsewhere)
#[derive(Debug, Clone, Serialize)]
pub struct AgentFile {
    pub id: i64,
    pub agent_id: i64,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub file_path: String,
    pub analysis_result: Option<Value>,
    pub uploaded_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentFileCreateInput {
    pub agent_id: i64,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub file_path: String,
    pub analysis_result: Option<Value>,
}

/// Row data for a file persisted to local upload storage
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub agent_id: Option<i64>,
    pub filename: String,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub description: String,
}

/// Metadata returned to the uploader; carries the server-assigned filename
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFileMeta {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub description: String,
    pub agent_id: Option<i64>,
}
