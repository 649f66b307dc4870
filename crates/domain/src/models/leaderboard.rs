//! Leaderboard domain models.
//!
//! Points accrue per (home, user, month, year) bucket; entries are only
//! ever created or incremented, never decremented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cumulative point total for one member in one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardEntry {
    pub home_id: Uuid,
    pub user_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub total_points: i64,
    pub updated_at: DateTime<Utc>,
}

/// A ranked row in the leaderboard listing, with display info.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

/// Response for the monthly leaderboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardResponse {
    pub home_id: Uuid,
    pub home_name: String,
    pub month: i32,
    pub year: i32,
    pub leaderboard: Vec<LeaderboardRow>,
}

/// An active member with their current-month score.
///
/// Used both by the lowest-scorers listing and by break-mode reassignment,
/// which must apply the same ranking rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberScore {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

/// Query parameters for the leaderboard endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardQuery {
    pub month: Option<i32>,
    pub year: Option<i32>,
}

/// Query parameters for the lowest-scorers endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LowestScorersQuery {
    pub limit: Option<i64>,
}

/// The winning entry for one month of a yearly summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyWinner {
    pub month: i32,
    pub year: i32,
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

/// Response for the yearly summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct YearlySummaryResponse {
    pub home_id: Uuid,
    pub home_name: String,
    pub year: i32,
    pub monthly_winners: Vec<MonthlyWinner>,
}

/// Per-home point total for the user stats view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HomePoints {
    pub home_id: Uuid,
    pub home_name: String,
    pub total_points: i64,
}

/// One month of the user's recent point trend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyPoints {
    pub month: i32,
    pub year: i32,
    pub monthly_points: i64,
}

/// Response for the requesting user's aggregate stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserStatsResponse {
    pub total_points: i64,
    pub total_tasks_completed: i64,
    pub points_by_home: Vec<HomePoints>,
    pub monthly_trends: Vec<MonthlyPoints>,
}
