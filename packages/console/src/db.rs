// ABOUTME: Database initialization and shared application state
// ABOUTME: Opens the SQLite pool, applies pragmas and migrations, wires storages

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::agents::AgentStorage;
use crate::auth::AuthStorage;
use crate::errors::{ErrorLogInput, ErrorLogStorage};
use crate::files::FileStorage;
use crate::messages::MessageStorage;
use crate::settings::SettingsStorage;
use crate::storage::StorageResult;
use crate::tasks::TaskStorage;
use crate::workgroups::WorkgroupStorage;

/// Shared state handed to every API handler
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    pub agents: Arc<AgentStorage>,
    pub tasks: Arc<TaskStorage>,
    pub workgroups: Arc<WorkgroupStorage>,
    pub messages: Arc<MessageStorage>,
    pub settings: Arc<SettingsStorage>,
    pub files: Arc<FileStorage>,
    pub auth: Arc<AuthStorage>,
    pub error_logs: Arc<ErrorLogStorage>,
}

impl DbState {
    pub fn new(pool: SqlitePool, upload_dir: PathBuf) -> Self {
        Self {
            agents: Arc::new(AgentStorage::new(pool.clone())),
            tasks: Arc::new(TaskStorage::new(pool.clone())),
            workgroups: Arc::new(WorkgroupStorage::new(pool.clone())),
            messages: Arc::new(MessageStorage::new(pool.clone())),
            settings: Arc::new(SettingsStorage::new(pool.clone())),
            files: Arc::new(FileStorage::new(pool.clone())),
            auth: Arc::new(AuthStorage::new(pool.clone())),
            error_logs: Arc::new(ErrorLogStorage::new(pool.clone())),
            pool,
            upload_dir,
        }
    }

    /// Open (or create) the database at `db_path` and run migrations
    pub async fn init_with_path(db_path: &Path, upload_dir: PathBuf) -> StorageResult<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::create_dir_all(&upload_dir).await?;

        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());
        info!("Opening database at: {}", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&database_url)
            .await?;

        // WAL for concurrent readers, NORMAL sync is safe under WAL
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations complete");

        Ok(Self::new(pool, upload_dir))
    }

    /// Record a server-side failure in the error log. Best effort: a
    /// failure to log must never mask the original error.
    pub async fn record_failure(&self, source: &str, detail: String) {
        let input = ErrorLogInput {
            error_type: Some("server".to_string()),
            severity: Some("high".to_string()),
            message: Some(detail),
            source: Some(source.to_string()),
            ..Default::default()
        };
        if let Err(e) = self.error_logs.record(input).await {
            warn!("Failed to record error log entry: {}", e);
        }
    }
}
