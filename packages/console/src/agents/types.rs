use serde::{Deserialize, Serialize};

/// An AI agent as exposed by the list endpoint (camelCase projection)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub status: String,
    pub tasks_completed: i64,
    pub current_task: Option<String>,
    /// Formatted as `YYYY-MM-DD HH:MM`
    pub last_active: String,
    pub efficiency: i64,
    pub api_key: String,
    pub model: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentCreateInput {
    pub name: String,
    pub role: String,
    pub status: Option<String>,
    pub efficiency: Option<i64>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    pub model: Option<String>,
}
