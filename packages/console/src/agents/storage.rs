// ABOUTME: Agent storage layer using SQLite
// ABOUTME: CRUD with a partial-update allow-list and an active-task delete guard

use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Agent, AgentCreateInput};
use crate::storage::update::{build_partial_update, AllowedField};
use crate::storage::{DeleteOutcome, StorageError, StorageResult};
use workforce_core::{DEFAULT_AGENT_MODEL, DEFAULT_AGENT_STATUS};

/// Columns a partial update is permitted to modify, in update order
const UPDATE_FIELDS: &[AllowedField] = &[
    AllowedField::plain("name", "name"),
    AllowedField::plain("role", "role"),
    AllowedField::plain("status", "status"),
    AllowedField::plain("tasksCompleted", "tasks_completed"),
    AllowedField::plain("currentTask", "current_task"),
    AllowedField::plain("efficiency", "efficiency"),
    AllowedField::plain("apiKey", "api_key"),
    AllowedField::plain("model", "model"),
];

pub struct AgentStorage {
    pool: SqlitePool,
}

impl AgentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all agents, newest-created first
    pub async fn list(&self) -> StorageResult<Vec<Agent>> {
        debug!("Fetching all agents");

        let rows = sqlx::query(
            r#"
            SELECT
                id,
                name,
                role,
                status,
                tasks_completed,
                current_task,
                strftime('%Y-%m-%d %H:%M', last_active) AS last_active,
                efficiency,
                api_key,
                model,
                created_at
            FROM agents
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_agent).collect()
    }

    /// Insert a new agent, applying creation defaults, and return its id
    pub async fn create(&self, input: AgentCreateInput) -> StorageResult<i64> {
        debug!("Creating agent: {}", input.name);

        let result = sqlx::query(
            r#"
            INSERT INTO agents (name, role, status, efficiency, api_key, model)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.role)
        .bind(input.status.as_deref().unwrap_or(DEFAULT_AGENT_STATUS))
        .bind(input.efficiency.unwrap_or(0))
        .bind(input.api_key.as_deref().unwrap_or(""))
        .bind(input.model.as_deref().unwrap_or(DEFAULT_AGENT_MODEL))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(result.last_insert_rowid())
    }

    /// Apply a partial update limited to the allow-listed fields.
    ///
    /// Fails with `NoFieldsToUpdate` when the input contains none of them;
    /// no UPDATE statement is issued in that case.
    pub async fn update(&self, id: i64, input: &Map<String, Value>) -> StorageResult<u64> {
        debug!("Updating agent: {}", id);

        let builder = build_partial_update("agents", UPDATE_FIELDS, input, "last_active", id)
            .map_err(StorageError::Json)?;

        let Some(mut builder) = builder else {
            return Err(StorageError::NoFieldsToUpdate);
        };

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Delete an agent unless tasks in {pending, in_progress} still reference it
    pub async fn delete(&self, id: i64) -> StorageResult<DeleteOutcome> {
        debug!("Deleting agent: {}", id);

        let active_tasks: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE assigned_agent_id = ? AND status IN ('pending', 'in_progress')
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if active_tasks > 0 {
            return Ok(DeleteOutcome::Blocked);
        }

        let result = sqlx::query("DELETE FROM agents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(if result.rows_affected() > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

fn row_to_agent(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Agent> {
    Ok(Agent {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        role: row.try_get("role")?,
        status: row.try_get("status")?,
        tasks_completed: row.try_get("tasks_completed")?,
        current_task: row.try_get("current_task")?,
        last_active: row.try_get("last_active")?,
        efficiency: row.try_get("efficiency")?,
        api_key: row.try_get("api_key")?,
        model: row.try_get("model")?,
        created_at: row.try_get("created_at")?,
    })
}
