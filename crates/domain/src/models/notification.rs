//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A notification addressed to a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListNotificationsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub unread_only: Option<bool>,
}

/// Response for the notification listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub has_more: bool,
}

/// Request payload for marking notifications as read.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MarkReadRequest {
    #[validate(length(min = 1, message = "Provide at least one notification ID"))]
    pub notification_ids: Vec<Uuid>,
}

/// Response carrying the unread notification count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_requires_ids() {
        let empty = MarkReadRequest {
            notification_ids: vec![],
        };
        assert!(empty.validate().is_err());

        let one = MarkReadRequest {
            notification_ids: vec![Uuid::new_v4()],
        };
        assert!(one.validate().is_ok());
    }
}
