// ABOUTME: Storage layer primitives shared across all resources
// ABOUTME: Error taxonomy, result alias, and the partial-update builder

use thiserror::Error;

pub mod update;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No fields to update")]
    NoFieldsToUpdate,
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a guarded delete.
///
/// `Blocked` means a referential guard refused the delete; the row still
/// exists afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Blocked,
}
