use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A task as exposed by the list endpoint (camelCase projection)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    /// Denormalized agent identifiers, stored as a JSON array
    pub assigned_to: Vec<Value>,
    pub progress: i64,
    pub due_date: Option<String>,
    pub estimated_time: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreateInput {
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "assignedTo", default)]
    pub assigned_to: Vec<Value>,
    pub progress: Option<i64>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
}
