//! Integration tests for break-mode toggling and task redistribution.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;
use uuid::Uuid;

fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

async fn toggle(
    app: &axum::Router,
    actor: &TestUser,
    home_id: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/break-mode/homes/{}/toggle-break", home_id),
        body,
        &actor.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    (status, body)
}

#[tokio::test]
async fn test_pausing_moves_all_pending_to_lowest_scorer() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    // Home H: A (admin, 100 pts), B (30 pts), C (0 pts, active).
    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let c = create_test_user(&pool, "Casey").await;
    let home_id = create_test_home(&app, &a, &unique_name("Redistribution Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;
    add_test_member(&app, &a, &home_id, &c).await;
    seed_points(&pool, &home_id, &a, 100).await;
    seed_points(&pool, &home_id, &b, 30).await;

    // A holds two pending tasks.
    for name in ["Kitchen", "Bathroom"] {
        let task_id = create_test_task(&app, &a, &home_id, name, "Medium").await;
        assign_test_task(&app, &a, &task_id, &a).await;
    }

    let c_notifications_before = unread_notification_count(&app, &c).await;

    let (status, body) = toggle(
        &app,
        &a,
        &home_id,
        serde_json::json!({ "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
    assert_eq!(body["reassigned_tasks"].as_u64().unwrap(), 2);

    // Both tasks moved to C, the lowest scorer, with one notification each.
    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/tasks/assigned", &c.token))
        .await
        .unwrap();
    let assigned = parse_response_body(response).await;
    assert_eq!(assigned.as_array().unwrap().len(), 2);

    assert_eq!(
        unread_notification_count(&app, &c).await,
        c_notifications_before + 2
    );

    // A holds nothing anymore.
    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/tasks/assigned", &a.token))
        .await
        .unwrap();
    let assigned = parse_response_body(response).await;
    assert!(assigned.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_reassigned_tasks_carry_system_origin() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Origin Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;

    let task_id = create_test_task(&app, &a, &home_id, "Handover", "Easy").await;
    // An admin assignment to B records a human origin first.
    assign_test_task(&app, &a, &task_id, &b).await;

    let (status, _) = toggle(
        &app,
        &a,
        &home_id,
        serde_json::json!({ "user_id": b.id, "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/tasks/{}", task_id),
            &a.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["current_assignment"]["origin"]["kind"], "system");
    assert_eq!(
        body["current_assignment"]["assigned_user_id"],
        a.id.to_string()
    );
}

#[tokio::test]
async fn test_pause_with_no_eligible_peer_keeps_assignments() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let home_id = create_test_home(&app, &a, &unique_name("Lonely Home")).await;

    let task_id = create_test_task(&app, &a, &home_id, "Solo chore", "Easy").await;
    assign_test_task(&app, &a, &task_id, &a).await;

    let (status, body) = toggle(
        &app,
        &a,
        &home_id,
        serde_json::json!({ "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reassigned_tasks"].as_u64().unwrap(), 0);

    // The task stays with the paused member.
    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/tasks/assigned", &a.token))
        .await
        .unwrap();
    let assigned = parse_response_body(response).await;
    assert_eq!(assigned.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pause_without_pending_work_is_a_status_flip() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Idle Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;

    let (status, body) = toggle(
        &app,
        &b,
        &home_id,
        serde_json::json!({ "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
    assert_eq!(body["reassigned_tasks"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_unpausing_never_reassigns() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Resume Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;

    // B holds a pending task and pauses; the task moves to A.
    let task_id = create_test_task(&app, &a, &home_id, "Handoff", "Easy").await;
    assign_test_task(&app, &b, &task_id, &b).await;
    toggle(&app, &b, &home_id, serde_json::json!({ "is_paused": true })).await;

    // Unpausing B moves nothing back.
    let (status, body) = toggle(
        &app,
        &b,
        &home_id,
        serde_json::json!({ "is_paused": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["reassigned_tasks"].as_u64().unwrap(), 0);

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/tasks/assigned", &a.token))
        .await
        .unwrap();
    let assigned = parse_response_body(response).await;
    assert_eq!(assigned.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_toggle_without_flag_flips_status() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let home_id = create_test_home(&app, &a, &unique_name("Flip Home")).await;

    let (_, body) = toggle(&app, &a, &home_id, serde_json::json!({})).await;
    assert_eq!(body["status"], "paused");

    let (_, body) = toggle(&app, &a, &home_id, serde_json::json!({})).await;
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_explicit_pause_is_idempotent() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let home_id = create_test_home(&app, &a, &unique_name("Idempotent Home")).await;

    let (_, body) = toggle(&app, &a, &home_id, serde_json::json!({ "is_paused": true })).await;
    assert_eq!(body["status"], "paused");

    let (_, body) = toggle(&app, &a, &home_id, serde_json::json!({ "is_paused": true })).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["reassigned_tasks"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_only_admins_may_toggle_others() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let c = create_test_user(&pool, "Casey").await;
    let home_id = create_test_home(&app, &a, &unique_name("Authority Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;
    add_test_member(&app, &a, &home_id, &c).await;

    // A plain member cannot pause a peer.
    let (status, _) = toggle(
        &app,
        &b,
        &home_id,
        serde_json::json!({ "user_id": c.id, "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An admin can.
    let (status, body) = toggle(
        &app,
        &a,
        &home_id,
        serde_json::json!({ "user_id": c.id, "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
}

#[tokio::test]
async fn test_toggle_unknown_member_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let stranger = create_test_user(&pool, "Stranger").await;
    let home_id = create_test_home(&app, &a, &unique_name("Unknown Member Home")).await;

    let (status, _) = toggle(
        &app,
        &a,
        &home_id,
        serde_json::json!({ "user_id": stranger.id, "is_paused": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
