use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workgroup row with its denormalized membership arrays decoded.
///
/// Exposed with snake_case keys, matching the raw-column projection of the
/// workgroup endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Workgroup {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub status: String,
    pub priority: String,
    pub agent_ids: Vec<Value>,
    pub task_ids: Vec<Value>,
    pub deadline: Option<String>,
    pub created_by: String,
    pub progress: i64,
    pub created_at: String,
    pub updated_at: String,
    pub agent_count: i64,
    pub task_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkgroupCreateInput {
    pub name: String,
    pub goal: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub agent_ids: Vec<Value>,
    #[serde(default)]
    pub task_ids: Vec<Value>,
    pub deadline: Option<String>,
    pub created_by: Option<String>,
}
