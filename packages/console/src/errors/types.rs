use serde::{Deserialize, Serialize};

/// A persisted error event, client- or server-side
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLog {
    pub id: i64,
    #[serde(rename = "type")]
    pub error_type: String,
    pub severity: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub user_id: Option<String>,
    pub source: Option<String>,
    pub created_at: String,
}

/// Input for the log endpoint; every field is optional and defaulted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorLogInput {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub stack_trace: Option<String>,
    pub user_id: Option<String>,
    pub source: Option<String>,
}
