// ABOUTME: HTTP API surface: routers, handlers, envelope, and validation
// ABOUTME: One router constructor per resource, nested under /api by the server

use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tracing::error;

use crate::db::DbState;
use crate::storage::StorageError;

pub mod agents_handlers;
pub mod auth;
pub mod auth_handlers;
pub mod errors_handlers;
pub mod files_handlers;
pub mod messages_handlers;
pub mod response;
pub mod settings_handlers;
pub mod tasks_handlers;
pub mod validation;
pub mod workgroups_handlers;

/// Log a storage failure, push it into the error log best-effort, and hand
/// the client the opaque 500 envelope
pub(crate) async fn storage_failure(state: &DbState, source: &str, err: StorageError) -> Response {
    error!("{} failed: {}", source, err);
    state.record_failure(source, err.to_string()).await;
    response::internal_error()
}

pub fn create_agents_router() -> Router<DbState> {
    Router::new()
        .route("/", get(agents_handlers::list_agents))
        .route("/create", post(agents_handlers::create_agent))
        .route("/update", post(agents_handlers::update_agent))
        .route("/delete", post(agents_handlers::delete_agent))
}

pub fn create_tasks_router() -> Router<DbState> {
    Router::new()
        .route("/", get(tasks_handlers::list_tasks))
        .route("/create", post(tasks_handlers::create_task))
        .route("/update", post(tasks_handlers::update_task))
        .route("/delete", post(tasks_handlers::delete_task))
}

pub fn create_workgroups_router() -> Router<DbState> {
    Router::new()
        .route("/", get(workgroups_handlers::list_workgroups))
        .route("/create", post(workgroups_handlers::create_workgroup))
        .route("/update", post(workgroups_handlers::update_workgroup))
        .route("/delete", post(workgroups_handlers::delete_workgroup))
}

pub fn create_messages_router() -> Router<DbState> {
    Router::new()
        .route("/", get(messages_handlers::list_messages))
        .route("/send", post(messages_handlers::send_message))
}

pub fn create_settings_router() -> Router<DbState> {
    Router::new()
        .route("/", get(settings_handlers::get_settings))
        .route("/update", post(settings_handlers::update_settings))
}

pub fn create_files_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(files_handlers::list_files)
                .post(files_handlers::create_file_record)
                .delete(files_handlers::delete_file),
        )
        .route("/upload", post(files_handlers::upload_file))
        .route("/analyze", post(files_handlers::analyze_file))
}

pub fn create_auth_router() -> Router<DbState> {
    Router::new()
        .route("/login", post(auth_handlers::login))
        .route("/verify", get(auth_handlers::verify))
        .route("/logout", post(auth_handlers::logout))
}

pub fn create_errors_router() -> Router<DbState> {
    Router::new()
        .route("/", get(errors_handlers::list_errors))
        .route("/log", post(errors_handlers::log_error))
        .route("/clear", post(errors_handlers::clear_errors))
}
