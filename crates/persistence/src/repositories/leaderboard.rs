//! Leaderboard repository: monthly point aggregation and ranking queries.

use chrono::{Datelike, Utc};
use domain::DomainError;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::entities::{
    HomePointsEntity, LeaderboardRowEntity, MemberScoreEntity, MonthlyPointsEntity,
    MonthlyWinnerEntity,
};
use crate::metrics::QueryTimer;

/// The current month and year in UTC, as stored in leaderboard keys.
pub(crate) fn current_month_year() -> (i32, i32) {
    let now = Utc::now();
    (now.month() as i32, now.year())
}

/// Atomically add points to a (home, user, month, year) bucket.
///
/// A single conditional upsert so concurrent completions for the same key
/// cannot lose updates.
pub(crate) async fn upsert_points<'e, E>(
    executor: E,
    home_id: Uuid,
    user_id: Uuid,
    month: i32,
    year: i32,
    delta: i64,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO leaderboard_entries (home_id, user_id, month, year, total_points)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (home_id, user_id, month, year)
        DO UPDATE SET
            total_points = leaderboard_entries.total_points + EXCLUDED.total_points,
            updated_at = NOW()
        "#,
    )
    .bind(home_id)
    .bind(user_id)
    .bind(month)
    .bind(year)
    .bind(delta)
    .execute(executor)
    .await?;
    Ok(())
}

/// Repository for leaderboard aggregation and ranking.
#[derive(Clone)]
pub struct LeaderboardRepository {
    pool: PgPool,
}

impl LeaderboardRepository {
    /// Creates a new LeaderboardRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add points to a member's bucket (insert if absent, else increment).
    pub async fn record_points(
        &self,
        home_id: Uuid,
        user_id: Uuid,
        month: i32,
        year: i32,
        delta: i64,
    ) -> Result<(), DomainError> {
        let timer = QueryTimer::new("record_points");
        upsert_points(&self.pool, home_id, user_id, month, year, delta).await?;
        timer.record();
        Ok(())
    }

    /// Monthly leaderboard, highest first, ties broken by display name.
    pub async fn get_leaderboard(
        &self,
        home_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<LeaderboardRowEntity>, DomainError> {
        let timer = QueryTimer::new("get_leaderboard");
        let result = sqlx::query_as::<_, LeaderboardRowEntity>(
            r#"
            SELECT l.user_id, u.display_name, u.avatar_url, l.total_points
            FROM leaderboard_entries l
            JOIN users u ON l.user_id = u.id
            WHERE l.home_id = $1 AND l.month = $2 AND l.year = $3
            ORDER BY l.total_points DESC, u.display_name ASC
            "#,
        )
        .bind(home_id)
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Active members of a home ranked by score ascending, missing entries
    /// counting as zero. Ties broken by display name for stable display.
    pub async fn lowest_scorers(
        &self,
        home_id: Uuid,
        month: i32,
        year: i32,
        limit: i64,
    ) -> Result<Vec<MemberScoreEntity>, DomainError> {
        let timer = QueryTimer::new("lowest_scorers");
        let result = sqlx::query_as::<_, MemberScoreEntity>(
            r#"
            SELECT hm.user_id, u.display_name, u.avatar_url,
                   COALESCE(l.total_points, 0) AS total_points
            FROM home_members hm
            JOIN users u ON hm.user_id = u.id
            LEFT JOIN leaderboard_entries l
                ON l.user_id = hm.user_id
               AND l.home_id = $1
               AND l.month = $2
               AND l.year = $3
            WHERE hm.home_id = $1 AND hm.status = 'active'
            ORDER BY total_points ASC, u.display_name ASC
            LIMIT $4
            "#,
        )
        .bind(home_id)
        .bind(month)
        .bind(year)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Per-month maximum-total entries for a year; ties resolved
    /// first-by-user-id so the winner is deterministic.
    pub async fn yearly_summary(
        &self,
        home_id: Uuid,
        year: i32,
    ) -> Result<Vec<MonthlyWinnerEntity>, DomainError> {
        let timer = QueryTimer::new("yearly_summary");
        let result = sqlx::query_as::<_, MonthlyWinnerEntity>(
            r#"
            SELECT DISTINCT ON (l.month)
                l.month, l.year, l.user_id, u.display_name, u.avatar_url, l.total_points
            FROM leaderboard_entries l
            JOIN users u ON l.user_id = u.id
            WHERE l.home_id = $1 AND l.year = $2
            ORDER BY l.month ASC, l.total_points DESC, l.user_id ASC
            "#,
        )
        .bind(home_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Point totals per home for one user, highest first.
    pub async fn points_by_home(&self, user_id: Uuid) -> Result<Vec<HomePointsEntity>, DomainError> {
        let timer = QueryTimer::new("points_by_home");
        let result = sqlx::query_as::<_, HomePointsEntity>(
            r#"
            SELECT h.id AS home_id, h.name AS home_name,
                   SUM(l.total_points)::BIGINT AS total_points
            FROM leaderboard_entries l
            JOIN homes h ON l.home_id = h.id
            WHERE l.user_id = $1
            GROUP BY h.id, h.name
            ORDER BY total_points DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Lifetime number of completions recorded by one user.
    pub async fn total_completed(&self, user_id: Uuid) -> Result<i64, DomainError> {
        let timer = QueryTimer::new("total_completed");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM task_completions WHERE completed_by = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Recent monthly point totals for one user across homes.
    pub async fn monthly_trends(
        &self,
        user_id: Uuid,
        months: i64,
    ) -> Result<Vec<MonthlyPointsEntity>, DomainError> {
        let timer = QueryTimer::new("monthly_trends");
        let result = sqlx::query_as::<_, MonthlyPointsEntity>(
            r#"
            SELECT l.month, l.year, SUM(l.total_points)::BIGINT AS monthly_points
            FROM leaderboard_entries l
            WHERE l.user_id = $1
            GROUP BY l.year, l.month
            ORDER BY l.year DESC, l.month DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(months)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_month_year_is_plausible() {
        let (month, year) = current_month_year();
        assert!((1..=12).contains(&month));
        assert!(year >= 2024);
    }
}
