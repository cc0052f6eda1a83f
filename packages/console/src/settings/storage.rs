// ABOUTME: Storage operations for console settings
// ABOUTME: JSON section upserts keyed by setting_key, replace-not-merge on read

use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::default_settings;
use crate::storage::{StorageError, StorageResult};

pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read all settings: the fixed defaults with every persisted section
    /// substituted wholesale (no deep merge)
    pub async fn get_all(&self) -> StorageResult<Map<String, Value>> {
        debug!("Fetching settings");

        let rows = sqlx::query("SELECT setting_key, setting_value FROM settings")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut settings = default_settings();
        for row in rows {
            let key: String = row.try_get("setting_key")?;
            let raw: String = row.try_get("setting_value")?;
            let value = serde_json::from_str(&raw)?;
            settings.insert(key, value);
        }

        Ok(settings)
    }

    /// Upsert every top-level section of `input`, JSON-encoding the values.
    /// All sections go in one transaction.
    pub async fn update(&self, input: &Map<String, Value>) -> StorageResult<()> {
        debug!("Updating {} settings section(s)", input.len());

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        for (key, value) in input {
            let encoded = serde_json::to_string(value)?;
            sqlx::query(
                r#"
                INSERT INTO settings (setting_key, setting_value, updated_at)
                VALUES (?, ?, datetime('now'))
                ON CONFLICT(setting_key) DO UPDATE SET
                    setting_value = excluded.setting_value,
                    updated_at = datetime('now')
                "#,
            )
            .bind(key)
            .bind(encoded)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(())
    }
}
