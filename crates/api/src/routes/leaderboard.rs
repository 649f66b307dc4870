//! Leaderboard routes: monthly rankings, lowest scorers, yearly summary.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use domain::models::home::HomeMembership;
use domain::models::leaderboard::{
    LeaderboardQuery, LeaderboardResponse, LowestScorersQuery, MemberScore, UserStatsResponse,
    YearlySummaryResponse,
};
use domain::services::membership::require_member;
use persistence::repositories::{HomeRepository, LeaderboardRepository};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

const DEFAULT_LOWEST_SCORERS_LIMIT: i64 = 5;

/// Resolve a month/year query, defaulting to the current UTC month.
fn resolve_month_year(month: Option<i32>, year: Option<i32>) -> Result<(i32, i32), ApiError> {
    let now = Utc::now();
    let month = month.unwrap_or(now.month() as i32);
    let year = year.unwrap_or(now.year());

    if !(1..=12).contains(&month) {
        return Err(ApiError::Validation(
            "Month must be between 1 and 12.".to_string(),
        ));
    }
    Ok((month, year))
}

/// Verify home membership and return the home's name.
async fn checked_home_name(
    state: &AppState,
    home_id: Uuid,
    user_id: Uuid,
) -> Result<String, ApiError> {
    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_id)
        .await?
        .map(Into::into);
    require_member(membership.as_ref())?;

    let home = repo
        .find_by_id(home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;
    Ok(home.name)
}

/// Monthly leaderboard for a home.
///
/// GET /api/v1/leaderboard/homes/:home_id
pub async fn get_home_leaderboard(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let (month, year) = resolve_month_year(query.month, query.year)?;
    let home_name = checked_home_name(&state, home_id, user_auth.user_id).await?;

    let rows = LeaderboardRepository::new(state.pool.clone())
        .get_leaderboard(home_id, month, year)
        .await?;

    Ok(Json(LeaderboardResponse {
        home_id,
        home_name,
        month,
        year,
        leaderboard: rows.into_iter().map(Into::into).collect(),
    }))
}

/// Active members ranked ascending by current-month points.
///
/// GET /api/v1/leaderboard/homes/:home_id/lowest-scorers
///
/// Diagnostic view over the same ranking that break-mode reassignment uses.
pub async fn get_lowest_scorers(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Query(query): Query<LowestScorersQuery>,
) -> Result<Json<Vec<MemberScore>>, ApiError> {
    checked_home_name(&state, home_id, user_auth.user_id).await?;

    let limit = query.limit.unwrap_or(DEFAULT_LOWEST_SCORERS_LIMIT);
    if limit < 1 {
        return Err(ApiError::Validation("Limit must be positive.".to_string()));
    }

    let now = Utc::now();
    let scorers = LeaderboardRepository::new(state.pool.clone())
        .lowest_scorers(home_id, now.month() as i32, now.year(), limit)
        .await?;

    Ok(Json(scorers.into_iter().map(Into::into).collect()))
}

/// Monthly winners for a year.
///
/// GET /api/v1/leaderboard/homes/:home_id/yearly-summary
pub async fn get_yearly_summary(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<YearlySummaryResponse>, ApiError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let home_name = checked_home_name(&state, home_id, user_auth.user_id).await?;

    let winners = LeaderboardRepository::new(state.pool.clone())
        .yearly_summary(home_id, year)
        .await?;

    Ok(Json(YearlySummaryResponse {
        home_id,
        home_name,
        year,
        monthly_winners: winners.into_iter().map(Into::into).collect(),
    }))
}

/// Aggregate stats for the requesting user across all their homes.
///
/// GET /api/v1/leaderboard/me/stats
pub async fn get_my_stats(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<UserStatsResponse>, ApiError> {
    let repo = LeaderboardRepository::new(state.pool.clone());

    let points_by_home = repo.points_by_home(user_auth.user_id).await?;
    let total_tasks_completed = repo.total_completed(user_auth.user_id).await?;
    let monthly_trends = repo.monthly_trends(user_auth.user_id, 6).await?;

    let total_points = points_by_home.iter().map(|h| h.total_points).sum();

    Ok(Json(UserStatsResponse {
        total_points,
        total_tasks_completed,
        points_by_home: points_by_home.into_iter().map(Into::into).collect(),
        monthly_trends: monthly_trends.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_month_year_defaults_to_now() {
        let (month, year) = resolve_month_year(None, None).unwrap();
        assert!((1..=12).contains(&month));
        assert!(year >= 2024);
    }

    #[test]
    fn test_resolve_month_year_explicit() {
        let (month, year) = resolve_month_year(Some(3), Some(2025)).unwrap();
        assert_eq!((month, year), (3, 2025));
    }

    #[test]
    fn test_resolve_month_year_rejects_out_of_range() {
        assert!(resolve_month_year(Some(0), None).is_err());
        assert!(resolve_month_year(Some(13), None).is_err());
    }
}
