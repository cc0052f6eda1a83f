// ABOUTME: Message storage layer using SQLite
// ABOUTME: Filtered, paginated read path with a parallel COUNT query

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Message, MessageFilter, MessagePage, MessageSendInput, Pagination};
use crate::storage::{StorageError, StorageResult};

pub struct MessageStorage {
    pool: SqlitePool,
}

impl MessageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List messages newest-first with the channel/agent filters applied.
    ///
    /// A second COUNT query with the same filters computes the total; two
    /// queries are deliberate, window functions are not worth it at
    /// admin-scale volumes.
    pub async fn list(&self, filter: &MessageFilter) -> StorageResult<MessagePage> {
        let (limit, offset) = filter.page();
        debug!(
            "Fetching messages (channel: {:?}, agent: {:?}, limit: {}, offset: {})",
            filter.channel, filter.agent, limit, offset
        );

        let mut sql = String::from(
            "SELECT m.*, a.name AS sender_name \
             FROM messages m \
             LEFT JOIN agents a ON m.sender_id = a.id \
             WHERE 1=1",
        );
        if filter.channel.is_some() {
            sql.push_str(" AND m.channel = ?");
        }
        if filter.agent.is_some() {
            sql.push_str(" AND (m.sender_id = ? OR m.channel = ?)");
        }
        sql.push_str(" ORDER BY m.created_at DESC, m.id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql);
        if let Some(channel) = &filter.channel {
            query = query.bind(channel);
        }
        if let Some(agent) = &filter.agent {
            query = query.bind(agent).bind(format!("agent_{}", agent));
        }
        let rows = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let messages = rows
            .iter()
            .map(row_to_message)
            .collect::<StorageResult<Vec<_>>>()?;

        let mut count_sql = String::from("SELECT COUNT(*) FROM messages WHERE 1=1");
        if filter.channel.is_some() {
            count_sql.push_str(" AND channel = ?");
        }
        if filter.agent.is_some() {
            count_sql.push_str(" AND (sender_id = ? OR channel = ?)");
        }

        let mut count_query = sqlx::query_scalar(&count_sql);
        if let Some(channel) = &filter.channel {
            count_query = count_query.bind(channel);
        }
        if let Some(agent) = &filter.agent {
            count_query = count_query.bind(agent).bind(format!("agent_{}", agent));
        }
        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(MessagePage {
            messages,
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: (offset + limit) < total,
            },
        })
    }

    /// Insert a message and return the created row joined with sender_name
    pub async fn send(&self, input: MessageSendInput) -> StorageResult<Message> {
        debug!("Sending message to channel: {}", input.channel);

        let metadata = input
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, channel, content, message_type, metadata)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.sender_id)
        .bind(&input.channel)
        .bind(&input.content)
        .bind(input.message_type.as_deref().unwrap_or("text"))
        .bind(metadata)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let row = sqlx::query(
            r#"
            SELECT m.*, a.name AS sender_name
            FROM messages m
            LEFT JOIN agents a ON m.sender_id = a.id
            WHERE m.id = ?
            "#,
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        row_to_message(&row)
    }
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Message> {
    let metadata: Option<String> = row.try_get("metadata")?;

    Ok(Message {
        id: row.try_get("id")?,
        sender_id: row.try_get("sender_id")?,
        sender_name: row.try_get("sender_name")?,
        channel: row.try_get("channel")?,
        content: row.try_get("content")?,
        message_type: row.try_get("message_type")?,
        metadata: metadata.and_then(|s| serde_json::from_str(&s).ok()),
        created_at: row.try_get("created_at")?,
    })
}
