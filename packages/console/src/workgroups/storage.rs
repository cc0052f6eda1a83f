// ABOUTME: Workgroup storage layer using SQLite
// ABOUTME: CRUD with JSON membership arrays and a transactional guarded delete

use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Workgroup, WorkgroupCreateInput};
use crate::storage::update::{build_partial_update, AllowedField};
use crate::storage::{DeleteOutcome, StorageError, StorageResult};

const UPDATE_FIELDS: &[AllowedField] = &[
    AllowedField::plain("name", "name"),
    AllowedField::plain("description", "description"),
    AllowedField::plain("goal", "goal"),
    AllowedField::plain("status", "status"),
    AllowedField::plain("priority", "priority"),
    AllowedField::plain("progress", "progress"),
    AllowedField::plain("deadline", "deadline"),
    AllowedField::json("agentIds", "agent_ids"),
    AllowedField::json("taskIds", "task_ids"),
];

pub struct WorkgroupStorage {
    pool: SqlitePool,
}

impl WorkgroupStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all workgroups, newest-created first
    pub async fn list(&self) -> StorageResult<Vec<Workgroup>> {
        debug!("Fetching all workgroups");

        let rows = sqlx::query("SELECT * FROM workgroups ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_workgroup).collect()
    }

    /// Fetch a single workgroup by id
    pub async fn get(&self, id: i64) -> StorageResult<Option<Workgroup>> {
        let row = sqlx::query("SELECT * FROM workgroups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_workgroup).transpose()
    }

    /// Insert a new workgroup and return the created row
    pub async fn create(&self, input: WorkgroupCreateInput) -> StorageResult<Workgroup> {
        debug!("Creating workgroup: {}", input.name);

        let agent_ids = serde_json::to_string(&input.agent_ids)?;
        let task_ids = serde_json::to_string(&input.task_ids)?;

        let result = sqlx::query(
            r#"
            INSERT INTO workgroups
                (name, description, goal, status, priority, agent_ids, task_ids, deadline, created_by)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(&input.goal)
        .bind(input.status.as_deref().unwrap_or("active"))
        .bind(input.priority.as_deref().unwrap_or("medium"))
        .bind(agent_ids)
        .bind(task_ids)
        .bind(&input.deadline)
        .bind(input.created_by.as_deref().unwrap_or("Admin"))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or(StorageError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Apply a partial update and return the re-read row
    pub async fn update(
        &self,
        id: i64,
        input: &Map<String, Value>,
    ) -> StorageResult<Option<Workgroup>> {
        debug!("Updating workgroup: {}", id);

        let builder = build_partial_update("workgroups", UPDATE_FIELDS, input, "updated_at", id)
            .map_err(StorageError::Json)?;

        let Some(mut builder) = builder else {
            return Err(StorageError::NoFieldsToUpdate);
        };

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get(id).await
    }

    /// Delete a workgroup unless tasks in {pending, in_progress} still
    /// reference it. Membership rows and the workgroup row go in one
    /// transaction so a crash cannot orphan either side.
    pub async fn delete(&self, id: i64) -> StorageResult<DeleteOutcome> {
        debug!("Deleting workgroup: {}", id);

        let active_tasks: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE workgroup_id = ? AND status IN ('pending', 'in_progress')
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if active_tasks > 0 {
            return Ok(DeleteOutcome::Blocked);
        }

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        sqlx::query("DELETE FROM workgroup_members WHERE workgroup_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        let result = sqlx::query("DELETE FROM workgroups WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(if result.rows_affected() > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }
}

fn row_to_workgroup(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Workgroup> {
    let agent_ids = decode_id_array(row.try_get("agent_ids")?);
    let task_ids = decode_id_array(row.try_get("task_ids")?);

    Ok(Workgroup {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        goal: row.try_get("goal")?,
        status: row.try_get("status")?,
        priority: row.try_get("priority")?,
        agent_count: agent_ids.len() as i64,
        task_count: task_ids.len() as i64,
        agent_ids,
        task_ids,
        deadline: row.try_get("deadline")?,
        created_by: row.try_get("created_by")?,
        progress: row.try_get("progress")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn decode_id_array(raw: Option<String>) -> Vec<Value> {
    raw.and_then(|s| serde_json::from_str::<Vec<Value>>(&s).ok())
        .unwrap_or_default()
}
