//! Notification routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::notification::{
    ListNotificationsQuery, ListNotificationsResponse, MarkReadRequest, UnreadCountResponse,
};
use persistence::repositories::NotificationRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// List the requesting user's notifications, newest first.
///
/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let unread_only = query.unread_only.unwrap_or(false);

    let (notifications, total) = NotificationRepository::new(state.pool.clone())
        .list(user_auth.user_id, limit, offset, unread_only)
        .await?;

    let has_more = notifications.len() as i64 + offset < total;

    Ok(Json(ListNotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
        total,
        has_more,
    }))
}

/// Count the requesting user's unread notifications.
///
/// GET /api/v1/notifications/count
pub async fn unread_count(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let count = NotificationRepository::new(state.pool.clone())
        .unread_count(user_auth.user_id)
        .await?;

    Ok(Json(UnreadCountResponse {
        unread_count: count,
    }))
}

/// Mark selected notifications as read.
///
/// PUT /api/v1/notifications/read
///
/// Every id must belong to the requesting user.
pub async fn mark_read(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<MarkReadRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    NotificationRepository::new(state.pool.clone())
        .mark_read(user_auth.user_id, &request.notification_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Mark all of the requesting user's notifications as read.
///
/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<StatusCode, ApiError> {
    NotificationRepository::new(state.pool.clone())
        .mark_all_read(user_auth.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete one of the requesting user's notifications.
///
/// DELETE /api/v1/notifications/:notification_id
pub async fn delete_notification(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = NotificationRepository::new(state.pool.clone())
        .delete(notification_id, user_auth.user_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Notification not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
