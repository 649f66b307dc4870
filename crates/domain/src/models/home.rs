//! Home domain models: collaborative groups of users sharing chores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserPublic;

/// Role within a home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeRole {
    Admin,
    Member,
}

impl HomeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeRole::Admin => "admin",
            HomeRole::Member => "member",
        }
    }

    /// Returns true if this role can manage tasks and members.
    pub fn is_admin(&self) -> bool {
        matches!(self, HomeRole::Admin)
    }
}

impl FromStr for HomeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(HomeRole::Admin),
            "member" => Ok(HomeRole::Member),
            _ => Err(format!("Invalid home role: {}", s)),
        }
    }
}

impl fmt::Display for HomeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Activity status of a home member.
///
/// Paused members keep their membership but receive no new assignments,
/// and their pending assignments are redistributed on pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Paused,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Paused => "paused",
        }
    }

    /// The status on the other side of a break toggle.
    pub fn toggled(&self) -> Self {
        match self {
            MemberStatus::Active => MemberStatus::Paused,
            MemberStatus::Paused => MemberStatus::Active,
        }
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "paused" => Ok(MemberStatus::Paused),
            _ => Err(format!("Invalid member status: {}", s)),
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A home: a named group of users who share chores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Home {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's membership in a home.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HomeMembership {
    pub id: Uuid,
    pub home_id: Uuid,
    pub user_id: Uuid,
    pub role: HomeRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a home.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateHomeRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Home name must be between 1 and 100 characters"
    ))]
    pub home_name: String,
}

/// Response for creating a home.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateHomeResponse {
    pub home_id: Uuid,
    pub home_name: String,
    pub your_role: HomeRole,
    pub created_at: DateTime<Utc>,
}

/// Home listing entry for the requesting user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HomeSummary {
    pub home_id: Uuid,
    pub home_name: String,
    pub member_count: i64,
    pub your_role: HomeRole,
    pub your_status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}

/// Request payload for adding a member by email.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddMemberRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub user_email: String,

    /// Defaults to `member` when omitted.
    pub role: Option<HomeRole>,
}

/// Request payload for updating a member's role or status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMemberRequest {
    pub role: Option<HomeRole>,
    pub status: Option<MemberStatus>,
}

/// Request payload for toggling break mode.
///
/// Omitting `user_id` targets the requester; omitting `is_paused` flips the
/// current status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToggleBreakRequest {
    pub user_id: Option<Uuid>,
    pub is_paused: Option<bool>,
}

/// Response after toggling break mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ToggleBreakResponse {
    pub user_id: Uuid,
    pub status: MemberStatus,
    pub reassigned_tasks: u64,
}

/// Response after updating a member's role or status.
///
/// A status change to paused redistributes the member's pending tasks;
/// the count of moved assignments is reported here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMemberResponse {
    pub user_id: Uuid,
    pub role: HomeRole,
    pub status: MemberStatus,
    pub reassigned_tasks: u64,
}

/// Response after removing a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveMemberResponse {
    pub removed: bool,
    pub home_id: Uuid,
    pub user_id: Uuid,
}

/// A member with user details, as returned by member listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HomeMemberResponse {
    pub user: UserPublic,
    pub email: String,
    pub role: HomeRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}
