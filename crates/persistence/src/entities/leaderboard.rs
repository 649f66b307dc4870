//! Leaderboard entities (database row mappings).

use domain::models::leaderboard::{
    HomePoints, LeaderboardRow, MemberScore, MonthlyPoints, MonthlyWinner,
};
use sqlx::FromRow;
use uuid::Uuid;

/// Leaderboard entry joined with user display info.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRowEntity {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

impl From<LeaderboardRowEntity> for LeaderboardRow {
    fn from(entity: LeaderboardRowEntity) -> Self {
        Self {
            user_id: entity.user_id,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
            total_points: entity.total_points,
        }
    }
}

/// An active member with their current-month score, zero when absent.
#[derive(Debug, Clone, FromRow)]
pub struct MemberScoreEntity {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

impl From<MemberScoreEntity> for MemberScore {
    fn from(entity: MemberScoreEntity) -> Self {
        Self {
            user_id: entity.user_id,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
            total_points: entity.total_points,
        }
    }
}

/// The maximum-total entry of one month, for the yearly summary.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyWinnerEntity {
    pub month: i32,
    pub year: i32,
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_points: i64,
}

impl From<MonthlyWinnerEntity> for MonthlyWinner {
    fn from(entity: MonthlyWinnerEntity) -> Self {
        Self {
            month: entity.month,
            year: entity.year,
            user_id: entity.user_id,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
            total_points: entity.total_points,
        }
    }
}

/// Per-home point total for the user stats view.
#[derive(Debug, Clone, FromRow)]
pub struct HomePointsEntity {
    pub home_id: Uuid,
    pub home_name: String,
    pub total_points: i64,
}

impl From<HomePointsEntity> for HomePoints {
    fn from(entity: HomePointsEntity) -> Self {
        Self {
            home_id: entity.home_id,
            home_name: entity.home_name,
            total_points: entity.total_points,
        }
    }
}

/// One month of a user's point trend.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyPointsEntity {
    pub month: i32,
    pub year: i32,
    pub monthly_points: i64,
}

impl From<MonthlyPointsEntity> for MonthlyPoints {
    fn from(entity: MonthlyPointsEntity) -> Self {
        Self {
            month: entity.month,
            year: entity.year,
            monthly_points: entity.monthly_points,
        }
    }
}
