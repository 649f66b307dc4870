//! Join-request entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::join_request::{JoinRequest, JoinRequestStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for join_request_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "join_request_status", rename_all = "lowercase")]
pub enum JoinRequestStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<JoinRequestStatusDb> for JoinRequestStatus {
    fn from(db: JoinRequestStatusDb) -> Self {
        match db {
            JoinRequestStatusDb::Pending => JoinRequestStatus::Pending,
            JoinRequestStatusDb::Accepted => JoinRequestStatus::Accepted,
            JoinRequestStatusDb::Rejected => JoinRequestStatus::Rejected,
        }
    }
}

impl From<JoinRequestStatus> for JoinRequestStatusDb {
    fn from(status: JoinRequestStatus) -> Self {
        match status {
            JoinRequestStatus::Pending => JoinRequestStatusDb::Pending,
            JoinRequestStatus::Accepted => JoinRequestStatusDb::Accepted,
            JoinRequestStatus::Rejected => JoinRequestStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the home_join_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub user_id: Uuid,
    pub message: Option<String>,
    pub status: JoinRequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<JoinRequestEntity> for JoinRequest {
    fn from(entity: JoinRequestEntity) -> Self {
        Self {
            id: entity.id,
            home_id: entity.home_id,
            user_id: entity.user_id,
            message: entity.message,
            status: entity.status.into(),
            created_at: entity.created_at,
            decided_at: entity.decided_at,
        }
    }
}

/// Home search hit with aggregates and pending-request flag.
#[derive(Debug, Clone, FromRow)]
pub struct HomeSearchEntity {
    pub home_id: Uuid,
    pub home_name: String,
    pub member_count: i64,
    pub admin_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub has_pending_request: bool,
}

/// The requesting user's pending request joined with home info.
#[derive(Debug, Clone, FromRow)]
pub struct MyJoinRequestEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub home_name: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pending request joined with requester and home info, for admins.
#[derive(Debug, Clone, FromRow)]
pub struct PendingJoinRequestEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub home_name: String,
    pub user_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
