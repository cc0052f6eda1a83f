// ABOUTME: File metadata storage using SQLite
// ABOUTME: agent_files CRUD with transactional files_count maintenance

use serde_json::Value;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{AgentFile, AgentFileCreateInput, UploadRecord, UploadedFileMeta};
use crate::storage::{StorageError, StorageResult};

pub struct FileStorage {
    pool: SqlitePool,
}

impl FileStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List an agent's files, newest upload first
    pub async fn list_for_agent(&self, agent_id: i64) -> StorageResult<Vec<AgentFile>> {
        debug!("Fetching files for agent: {}", agent_id);

        let rows = sqlx::query(
            "SELECT * FROM agent_files WHERE agent_id = ? ORDER BY uploaded_at DESC, id DESC",
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_agent_file).collect()
    }

    /// Fetch a single agent file by id
    pub async fn get(&self, id: i64) -> StorageResult<Option<AgentFile>> {
        let row = sqlx::query("SELECT * FROM agent_files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_agent_file).transpose()
    }

    /// Insert a metadata row and bump the agent's files_count in the same
    /// transaction, then return the created row
    pub async fn create_metadata(&self, input: AgentFileCreateInput) -> StorageResult<AgentFile> {
        debug!("Recording file {} for agent {}", input.file_name, input.agent_id);

        let analysis = input
            .analysis_result
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result = sqlx::query(
            r#"
            INSERT INTO agent_files
                (agent_id, file_name, file_size, mime_type, file_path, analysis_result)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.agent_id)
        .bind(&input.file_name)
        .bind(input.file_size)
        .bind(&input.mime_type)
        .bind(&input.file_path)
        .bind(analysis)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        sqlx::query("UPDATE agents SET files_count = files_count + 1 WHERE id = ?")
            .bind(input.agent_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or(StorageError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Delete a metadata row and decrement the owning agent's files_count
    /// transactionally. Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting file: {}", id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let agent_id: Option<i64> =
            sqlx::query_scalar("SELECT agent_id FROM agent_files WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;

        let result = sqlx::query("DELETE FROM agent_files WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        if let Some(agent_id) = agent_id {
            if result.rows_affected() > 0 {
                sqlx::query("UPDATE agents SET files_count = files_count - 1 WHERE id = ?")
                    .bind(agent_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::Sqlx)?;
            }
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(())
    }

    /// Store an analysis result against a file and return the updated row
    pub async fn set_analysis(&self, id: i64, analysis: &Value) -> StorageResult<Option<AgentFile>> {
        debug!("Updating analysis for file: {}", id);

        let encoded = serde_json::to_string(analysis)?;

        sqlx::query(
            "UPDATE agent_files SET analysis_result = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(encoded)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get(id).await
    }

    /// Record a file persisted to local upload storage
    pub async fn record_upload(&self, record: &UploadRecord) -> StorageResult<UploadedFileMeta> {
        debug!("Recording upload: {}", record.filename);

        let result = sqlx::query(
            r#"
            INSERT INTO files
                (agent_id, filename, original_name, file_path, file_size, mime_type, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.agent_id)
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(&record.file_path)
        .bind(record.file_size)
        .bind(&record.mime_type)
        .bind(&record.description)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(UploadedFileMeta {
            id: result.last_insert_rowid(),
            filename: record.filename.clone(),
            original_name: record.original_name.clone(),
            file_size: record.file_size,
            mime_type: record.mime_type.clone(),
            description: record.description.clone(),
            agent_id: record.agent_id,
        })
    }
}

fn row_to_agent_file(row: &sqlx::sqlite::SqliteRow) -> StorageResult<AgentFile> {
    let analysis: Option<String> = row.try_get("analysis_result")?;

    Ok(AgentFile {
        id: row.try_get("id")?,
        agent_id: row.try_get("agent_id")?,
        file_name: row.try_get("file_name")?,
        file_size: row.try_get("file_size")?,
        mime_type: row.try_get("mime_type")?,
        file_path: row.try_get("file_path")?,
        analysis_result: analysis.and_then(|s| serde_json::from_str(&s).ok()),
        uploaded_at: row.try_get("uploaded_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
