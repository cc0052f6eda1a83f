// ABOUTME: Integration tests for workgroup CRUD through the HTTP router

mod common;

use common::{app, get, send_json, setup_state};
use serde_json::json;

#[tokio::test]
async fn create_returns_row_with_counts() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/workgroups/create",
        json!({
            "name": "Alpha",
            "goal": "Ship the console",
            "agent_ids": [1, 2],
            "task_ids": [3]
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], json!("Workgroup created successfully"));

    let group = &body["data"];
    assert_eq!(group["status"], json!("active"));
    assert_eq!(group["priority"], json!("medium"));
    assert_eq!(group["created_by"], json!("Admin"));
    assert_eq!(group["agent_ids"], json!([1, 2]));
    assert_eq!(group["agent_count"], json!(2));
    assert_eq!(group["task_count"], json!(1));
}

#[tokio::test]
async fn create_requires_name_and_goal() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/workgroups/create",
        json!({"name": "Alpha"}),
    )
    .await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Field 'goal' is required"));
}

#[tokio::test]
async fn update_returns_reread_row() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/workgroups/create",
        json!({"name": "Alpha", "goal": "g"}),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/workgroups/update",
        json!({"id": id, "progress": 60, "agentIds": [5, 6, 7]}),
    )
    .await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["progress"], json!(60));
    assert_eq!(body["data"]["agent_count"], json!(3));
}

#[tokio::test]
async fn update_missing_workgroup_reports_not_found() {
    let (state, _dir) = setup_state().await;
    let app = app(state);

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/workgroups/update",
        json!({"id": 404, "progress": 1}),
    )
    .await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Workgroup not found"));
}

#[tokio::test]
async fn delete_blocked_then_cleans_membership_rows() {
    let (state, _dir) = setup_state().await;
    let pool = state.pool.clone();
    let app = app(state);

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/workgroups/create",
        json!({"name": "Alpha", "goal": "g"}),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    sqlx::query("INSERT INTO workgroup_members (workgroup_id, agent_id) VALUES (?, 1)")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO tasks (title, description, status, workgroup_id) VALUES ('t', 'd', 'pending', ?)",
    )
    .bind(id)
    .execute(&pool)
    .await
    .unwrap();

    let (_, body) = send_json(&app, "POST", "/api/workgroups/delete", json!({"id": id})).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["error"],
        json!("Cannot delete workgroup with active tasks. Please complete or reassign tasks first.")
    );

    sqlx::query("UPDATE tasks SET status = 'completed' WHERE workgroup_id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let (_, body) = send_json(&app, "POST", "/api/workgroups/delete", json!({"id": id})).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Workgroup deleted successfully"));

    let members: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workgroup_members WHERE workgroup_id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(members, 0);

    let (_, body) = get(&app, "/api/workgroups").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
