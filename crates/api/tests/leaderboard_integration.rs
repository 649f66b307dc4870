//! Integration tests for leaderboard aggregation and ranking queries.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;
use uuid::Uuid;

fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_leaderboard_orders_descending_by_points() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Ranked Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;
    seed_points(&pool, &home_id, &a, 40).await;
    seed_points(&pool, &home_id, &b, 90).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}", home_id),
            &a.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    let rows = body["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["user_id"], b.id.to_string());
    assert_eq!(rows[0]["total_points"].as_i64().unwrap(), 90);
    assert_eq!(rows[1]["user_id"], a.id.to_string());
}

#[tokio::test]
async fn test_leaderboard_requires_membership() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let outsider = create_test_user(&pool, "Outsider").await;
    let home_id = create_test_home(&app, &a, &unique_name("Private Board")).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}", home_id),
            &outsider.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_lowest_scorers_defaults_missing_entries_to_zero() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let c = create_test_user(&pool, "Casey").await;
    let home_id = create_test_home(&app, &a, &unique_name("Zeroes Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;
    add_test_member(&app, &a, &home_id, &c).await;
    seed_points(&pool, &home_id, &a, 100).await;
    seed_points(&pool, &home_id, &b, 30).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}/lowest-scorers", home_id),
            &a.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    // C has no entry and ranks first with zero points.
    assert_eq!(rows[0]["user_id"], c.id.to_string());
    assert_eq!(rows[0]["total_points"].as_i64().unwrap(), 0);
    assert_eq!(rows[1]["user_id"], b.id.to_string());
    assert_eq!(rows[2]["user_id"], a.id.to_string());
}

#[tokio::test]
async fn test_lowest_scorers_excludes_paused_members() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Paused Out Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/break-mode/homes/{}/toggle-break", home_id),
        serde_json::json!({ "user_id": b.id, "is_paused": true }),
        &a.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}/lowest-scorers", home_id),
            &a.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], a.id.to_string());
}

#[tokio::test]
async fn test_yearly_summary_picks_monthly_winner() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let b = create_test_user(&pool, "Blake").await;
    let home_id = create_test_home(&app, &a, &unique_name("Yearly Home")).await;
    add_test_member(&app, &a, &home_id, &b).await;
    seed_points(&pool, &home_id, &a, 50).await;
    seed_points(&pool, &home_id, &b, 80).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}/yearly-summary", home_id),
            &a.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    let winners = body["monthly_winners"].as_array().unwrap();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0]["user_id"], b.id.to_string());
    assert_eq!(winners[0]["total_points"].as_i64().unwrap(), 80);
}

#[tokio::test]
async fn test_month_query_outside_range_is_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let home_id = create_test_home(&app, &a, &unique_name("Range Home")).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leaderboard/homes/{}?month=13", home_id),
            &a.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_stats_aggregates_completions() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let a = create_test_user(&pool, "Avery").await;
    let home_id = create_test_home(&app, &a, &unique_name("Stats Home")).await;

    for (name, difficulty) in [("One", "Easy"), ("Two", "Medium"), ("Three", "Hard")] {
        let task_id = create_test_task(&app, &a, &home_id, name, difficulty).await;
        let assignment_id = assign_test_task(&app, &a, &task_id, &a).await;
        let request = json_request_with_auth(
            Method::PUT,
            "/api/v1/tasks/complete",
            serde_json::json!({ "assignment_id": assignment_id }),
            &a.token,
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/leaderboard/me/stats", &a.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    assert_eq!(body["total_points"].as_i64().unwrap(), 35);
    assert_eq!(body["total_tasks_completed"].as_i64().unwrap(), 3);
    assert_eq!(body["points_by_home"].as_array().unwrap().len(), 1);
}
