// ABOUTME: Append-only error log storage using SQLite

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{ErrorLog, ErrorLogInput};
use crate::storage::{StorageError, StorageResult};

pub struct ErrorLogStorage {
    pool: SqlitePool,
}

impl ErrorLogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an error event, applying input defaults
    pub async fn record(&self, input: ErrorLogInput) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO error_logs (type, severity, message, stack_trace, user_id, source)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.error_type.as_deref().unwrap_or("unknown"))
        .bind(input.severity.as_deref().unwrap_or("medium"))
        .bind(input.message.as_deref().unwrap_or("No message"))
        .bind(&input.stack_trace)
        .bind(&input.user_id)
        .bind(&input.source)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    /// Full table dump, oldest first
    pub async fn list(&self) -> StorageResult<Vec<ErrorLog>> {
        debug!("Fetching error logs");

        let rows = sqlx::query("SELECT * FROM error_logs")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_error_log).collect()
    }

    /// Truncate the log
    pub async fn clear(&self) -> StorageResult<()> {
        debug!("Clearing error logs");

        sqlx::query("DELETE FROM error_logs")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }
}

fn row_to_error_log(row: &sqlx::sqlite::SqliteRow) -> StorageResult<ErrorLog> {
    Ok(ErrorLog {
        id: row.try_get("id")?,
        error_type: row.try_get("type")?,
        severity: row.try_get("severity")?,
        message: row.try_get("message")?,
        stack_trace: row.try_get("stack_trace")?,
        user_id: row.try_get("user_id")?,
        source: row.try_get("source")?,
        created_at: row.try_get("created_at")?,
    })
}
