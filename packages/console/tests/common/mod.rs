// ABOUTME: Shared test fixtures: in-memory database, router assembly, request helpers
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use workforce_console::api;
use workforce_console::DbState;

/// Fresh state over an in-memory database with migrations applied.
///
/// A single connection is required: every `:memory:` connection is its own
/// database.
pub async fn setup_state() -> (DbState, tempfile::TempDir) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("failed to enable foreign keys");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    let upload_dir = tempfile::tempdir().expect("failed to create upload dir");
    let state = DbState::new(pool, upload_dir.path().to_path_buf());
    (state, upload_dir)
}

/// The full resource router as the server nests it
pub fn app(state: DbState) -> Router {
    Router::new()
        .nest("/api/agents", api::create_agents_router())
        .nest("/api/tasks", api::create_tasks_router())
        .nest("/api/workgroups", api::create_workgroups_router())
        .nest("/api/messages", api::create_messages_router())
        .nest("/api/settings", api::create_settings_router())
        .nest("/api/files", api::create_files_router())
        .nest("/api/auth", api::create_auth_router())
        .nest("/api/errors", api::create_errors_router())
        .with_state(state)
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    dispatch(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request");
    dispatch(app, request).await
}

pub async fn get_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request");
    dispatch(app, request).await
}

pub async fn post_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request");
    dispatch(app, request).await
}

pub async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
