// ABOUTME: Task storage layer using SQLite
// ABOUTME: CRUD with JSON-encoded assignment arrays and unconditional delete

use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Task, TaskCreateInput};
use crate::storage::update::{build_partial_update, AllowedField};
use crate::storage::{DeleteOutcome, StorageError, StorageResult};

const UPDATE_FIELDS: &[AllowedField] = &[
    AllowedField::plain("title", "title"),
    AllowedField::plain("description", "description"),
    AllowedField::plain("status", "status"),
    AllowedField::plain("priority", "priority"),
    AllowedField::json("assignedTo", "assigned_to"),
    AllowedField::plain("assignedAgentId", "assigned_agent_id"),
    AllowedField::plain("dueDate", "due_date"),
    AllowedField::plain("estimatedTime", "estimated_time"),
    AllowedField::plain("progress", "progress"),
];

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all tasks, newest-created first
    pub async fn list(&self) -> StorageResult<Vec<Task>> {
        debug!("Fetching all tasks");

        let rows = sqlx::query(
            r#"
            SELECT
                id,
                title,
                description,
                priority,
                status,
                assigned_to,
                progress,
                due_date,
                estimated_time,
                created_at
            FROM tasks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_task).collect()
    }

    /// Insert a new task and return its id
    pub async fn create(&self, input: TaskCreateInput) -> StorageResult<i64> {
        debug!("Creating task: {}", input.title);

        let assigned_to = serde_json::to_string(&input.assigned_to)?;

        let result = sqlx::query(
            r#"
            INSERT INTO tasks
                (title, description, priority, status, assigned_to, progress, due_date, estimated_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority.as_deref().unwrap_or("medium"))
        .bind(input.status.as_deref().unwrap_or("pending"))
        .bind(assigned_to)
        .bind(input.progress.unwrap_or(0))
        .bind(&input.due_date)
        .bind(&input.estimated_time)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(result.last_insert_rowid())
    }

    /// Apply a partial update; returns the affected-row count so the caller
    /// can distinguish a missing task
    pub async fn update(&self, id: i64, input: &Map<String, Value>) -> StorageResult<u64> {
        debug!("Updating task: {}", id);

        let builder = build_partial_update("tasks", UPDATE_FIELDS, input, "updated_at", id)
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

    /// Delete a task unconditionally by id
    pub async fn delete(&self, id: i64) -> StorageResult<DeleteOutcome> {
        debug!("Deleting task: {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
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

fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Task> {
    let assigned_to: Option<String> = row.try_get("assigned_to")?;
    let assigned_to = assigned_to
        .and_then(|s| serde_json::from_str::<Vec<Value>>(&s).ok())
        .unwrap_or_default();

    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        priority: row.try_get("priority")?,
        status: row.try_get("status")?,
        assigned_to,
        progress: row.try_get("progress")?,
        due_date: row.try_get("due_date")?,
        estimated_time: row.try_get("estimated_time")?,
        created_at: row.try_get("created_at")?,
    })
}
