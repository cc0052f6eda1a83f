// ABOUTME: Router-level tests for the assembled server: health, CORS, auth guard

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use workforce_cli::api::create_router;
use workforce_cli::config::Config;
use workforce_console::DbState;

async fn setup(require_auth: bool) -> (Router, DbState, tempfile::TempDir) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("../console/migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    let upload_dir = tempfile::tempdir().expect("failed to create upload dir");
    let db = DbState::new(pool, upload_dir.path().to_path_buf());

    let config = Config {
        port: 4000,
        cors_origin: "*".to_string(),
        db_path: "unused".into(),
        upload_dir: upload_dir.path().to_path_buf(),
        require_auth,
    };

    let app = create_router(&config, db.clone()).expect("failed to build router");
    (app, db, upload_dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _db, _dir) = setup(false).await;

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["message"], json!("Backend is running"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let (app, _db, _dir) = setup(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/agents")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn crud_routes_are_open_without_auth_guard() {
    let (app, _db, _dir) = setup(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/agents/create")
                .header("content-type", "application/json")
                .body(Body::from(json!({"name": "Bot1", "role": "analyst"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Agent created successfully"));
}

#[tokio::test]
async fn guard_rejects_unauthenticated_requests() {
    let (app, _db, _dir) = setup(true).await;

    let response = app
        .oneshot(Request::builder().uri("/api/agents").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Authorization token required"));
}

#[tokio::test]
async fn guard_whitelists_health_and_login() {
    let (app, _db, _dir) = setup(true).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Login is reachable; the credentials just don't exist
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(json!({"username": "admin", "password": "x"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Invalid credentials"));
}

#[tokio::test]
async fn guard_admits_valid_sessions() {
    let (app, db, _dir) = setup(true).await;

    db.auth
        .create_user("admin", "admin@workforce.local", "hunter2", "admin")
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "hunter2"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let login = body_json(response).await;
    let token = login["data"]["session_token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/agents")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
}
