// ABOUTME: Integration tests for login, session verification, and logout

mod common;

use common::{app, get_with_auth, post_with_auth, send_json, setup_state};
use serde_json::json;
use workforce_console::DbState;

async fn seed_user(state: &DbState) -> i64 {
    state
        .auth
        .create_user("admin", "admin@workforce.local", "hunter2", "admin")
        .await
        .expect("failed to seed user")
}

#[tokio::test]
async fn login_mints_hex_session_token() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let app = app(state);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "hunter2"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Login successful"));
    assert_eq!(body["data"]["user"]["username"], json!("admin"));

    let token = body["data"]["session_token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert!(body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn login_accepts_email_as_identifier() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let app = app(state);

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin@workforce.local", "password": "hunter2"}),
    )
    .await;
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let app = app(state);

    let (_, wrong_password) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "nope"}),
    )
    .await;
    let (_, unknown_user) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "nobody", "password": "nope"}),
    )
    .await;

    assert_eq!(wrong_password["error"], json!("Invalid credentials"));
    assert_eq!(unknown_user["error"], wrong_password["error"]);
}

#[tokio::test]
async fn disabled_account_cannot_login() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let pool = state.pool.clone();
    let app = app(state);

    sqlx::query("UPDATE users SET is_active = 0 WHERE username = 'admin'")
        .execute(&pool)
        .await
        .unwrap();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "hunter2"}),
    )
    .await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Account is disabled"));
}

#[tokio::test]
async fn verify_slides_expiry_forward() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let app = app(state);

    let (_, login) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "hunter2"}),
    )
    .await;
    let token = login["data"]["session_token"].as_str().unwrap().to_string();

    let (_, first) = get_with_auth(&app, "/api/auth/verify", &token).await;
    assert_eq!(first["success"], json!(true));
    assert_eq!(first["data"]["user"]["username"], json!("admin"));
    // Verify never echoes the token back
    assert!(first["data"]["session_token"].is_null());

    let (_, second) = get_with_auth(&app, "/api/auth/verify", &token).await;
    assert_eq!(second["success"], json!(true));

    // datetime('now', ...) strings sort chronologically
    let e1 = first["data"]["expires_at"].as_str().unwrap();
    let e2 = second["data"]["expires_at"].as_str().unwrap();
    assert!(e2 >= e1, "expiry went backwards: {} then {}", e1, e2);
}

#[tokio::test]
async fn verify_without_token_is_rejected() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (_, body) = common::get(&app, "/api/auth/verify").await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Authorization token required"));
}

#[tokio::test]
async fn logout_is_idempotent_and_ends_the_session() {
    let (state, _dir) = setup_state().await;
    seed_user(&state).await;
    let app = app(state);

    let (_, login) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "hunter2"}),
    )
    .await;
    let token = login["data"]["session_token"].as_str().unwrap().to_string();

    let (_, body) = post_with_auth(&app, "/api/auth/logout", &token).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Logout successful"));

    // Session is gone
    let (_, body) = get_with_auth(&app, "/api/auth/verify", &token).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Invalid or expired session"));

    // Second logout with the dead token still succeeds
    let (_, body) = post_with_auth(&app, "/api/auth/logout", &token).await;
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn expired_sessions_are_garbage_collected_on_login() {
    let (state, _dir) = setup_state().await;
    let user_id = seed_user(&state).await;
    let pool = state.pool.clone();
    let app = app(state);

    sqlx::query(
        "INSERT INTO user_sessions (user_id, session_token, expires_at) VALUES (?, 'stale', datetime('now', '-1 hour'))",
    )
    .bind(user_id)
    .execute(&pool)
    .await
    .unwrap();

    send_json(
        &app,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "hunter2"}),
    )
    .await;

    let stale: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE session_token = 'stale'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stale, 0);
}
