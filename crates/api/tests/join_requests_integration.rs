//! Integration tests for home search and join-request handling.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;
use uuid::Uuid;

fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

async fn request_join(
    app: &axum::Router,
    user: &TestUser,
    home_id: &str,
) -> (StatusCode, serde_json::Value) {
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/join-requests/homes/{}", home_id),
        serde_json::json!({ "request_message": "Let me in please" }),
        &user.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    (status, body)
}

#[tokio::test]
async fn test_search_requires_three_characters() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let user = create_test_user(&pool, "Seeker").await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            "/api/v1/join-requests/search?name=ab",
            &user.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_finds_home_and_flags_pending_request() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let marker = Uuid::new_v4().simple().to_string();
    let home_id = create_test_home(&app, &admin, &format!("Searchable {}", marker)).await;

    let uri = format!("/api/v1/join-requests/search?name={}", marker);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(&uri, &seeker.token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["home_id"], home_id);
    assert_eq!(hits[0]["has_pending_request"], false);
    assert_eq!(hits[0]["member_count"].as_i64().unwrap(), 1);

    let (status, _) = request_join(&app, &seeker, &home_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(&uri, &seeker.token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body[0]["has_pending_request"], true);
}

#[tokio::test]
async fn test_join_request_notifies_admins_and_rejects_duplicates() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Requested Home")).await;

    let before = unread_notification_count(&app, &admin).await;

    let (status, _) = request_join(&app, &seeker, &home_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(unread_notification_count(&app, &admin).await, before + 1);

    // A second pending request conflicts.
    let (status, _) = request_join(&app, &seeker, &home_id).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Members cannot request to join again.
    let (status, _) = request_join(&app, &admin, &home_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accept_adds_membership_and_notifies() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Welcoming Home")).await;

    let (_, body) = request_join(&app, &seeker, &home_id).await;
    let request_id = body["id"].as_str().unwrap().to_string();

    let before = unread_notification_count(&app, &seeker).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/join-requests/{}", request_id),
        serde_json::json!({ "status": "accepted" }),
        &admin.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The requester is now a member and has been told.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/homes/{}", home_id),
            &seeker.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(unread_notification_count(&app, &seeker).await, before + 1);
}

#[tokio::test]
async fn test_reject_keeps_requester_out() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Selective Home")).await;

    let (_, body) = request_join(&app, &seeker, &home_id).await;
    let request_id = body["id"].as_str().unwrap().to_string();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/join-requests/{}", request_id),
        serde_json::json!({ "status": "rejected" }),
        &admin.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/homes/{}", home_id),
            &seeker.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_respond_requires_admin_and_valid_decision() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let bystander = create_test_user(&pool, "Bystander").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Guarded Home")).await;

    let (_, body) = request_join(&app, &seeker, &home_id).await;
    let request_id = body["id"].as_str().unwrap().to_string();

    // Non-admins cannot decide.
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/join-requests/{}", request_id),
        serde_json::json!({ "status": "accepted" }),
        &bystander.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // "pending" is not a decision.
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/join-requests/{}", request_id),
        serde_json::json!({ "status": "pending" }),
        &admin.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_own_pending_request() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Changed Mind Home")).await;

    let (_, body) = request_join(&app, &seeker, &home_id).await;
    let request_id = body["id"].as_str().unwrap().to_string();

    // Shows up in "mine".
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            "/api/v1/join-requests/mine",
            &seeker.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/join-requests/{}", request_id),
            &seeker.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Cancelling again is a not-found.
    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/join-requests/{}", request_id),
            &seeker.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_sees_pending_requests() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool.clone());

    let admin = create_test_user(&pool, "Avery").await;
    let seeker = create_test_user(&pool, "Seeker").await;
    let home_id = create_test_home(&app, &admin, &unique_name("Queue Home")).await;

    request_join(&app, &seeker, &home_id).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            "/api/v1/join-requests/pending",
            &admin.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"].as_i64().unwrap(), 1);
    assert_eq!(body["requests"][0]["user"]["id"], seeker.id.to_string());
    assert_eq!(body["requests"][0]["home_id"], home_id);
}
