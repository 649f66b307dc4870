//! Home join-request domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserPublic;

/// Status of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl JoinRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinRequestStatus::Pending => "pending",
            JoinRequestStatus::Accepted => "accepted",
            JoinRequestStatus::Rejected => "rejected",
        }
    }

    /// True for the two terminal states an admin may set.
    pub fn is_decision(&self) -> bool {
        matches!(self, JoinRequestStatus::Accepted | JoinRequestStatus::Rejected)
    }
}

impl fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request by a user to join a home.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinRequest {
    pub id: Uuid,
    pub home_id: Uuid,
    pub user_id: Uuid,
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Query parameters for home search.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SearchHomesQuery {
    #[validate(length(min = 3, message = "Provide at least 3 characters for search"))]
    pub name: String,
}

/// A home search hit, annotated with the searcher's pending-request flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HomeSearchResult {
    pub home_id: Uuid,
    pub home_name: String,
    pub member_count: i64,
    pub admin_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub has_pending_request: bool,
}

/// Request payload for creating a join request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateJoinRequestRequest {
    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub request_message: Option<String>,
}

/// Request payload for an admin's decision on a join request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RespondJoinRequestRequest {
    pub status: JoinRequestStatus,
}

/// One of the requesting user's own pending requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MyJoinRequestResponse {
    pub request_id: Uuid,
    pub home_id: Uuid,
    pub home_name: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pending request as seen by a home admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PendingJoinRequestResponse {
    pub request_id: Uuid,
    pub home_id: Uuid,
    pub home_name: String,
    pub user: UserPublic,
    pub email: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response for listing pending requests across administered homes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PendingJoinRequestsResponse {
    pub count: usize,
    pub requests: Vec<PendingJoinRequestResponse>,
}
