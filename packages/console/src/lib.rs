//! # Workforce Console
//!
//! Domain library for the AI Workforce admin console. Provides the SQLite
//! storage layers, domain types, and the HTTP API handlers consumed by the
//! server binary.

pub mod agents;
pub mod api;
pub mod auth;
pub mod db;
pub mod errors;
pub mod files;
pub mod messages;
pub mod settings;
pub mod storage;
pub mod tasks;
pub mod workgroups;

// Re-export database state
pub use db::DbState;

// Re-export storage types
pub use storage::{DeleteOutcome, StorageError, StorageResult};

// Re-export the response envelope
pub use api::response::ApiResponse;
