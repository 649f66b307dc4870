//! Break-mode repository: member status toggling and task redistribution.
//!
//! Pausing a member moves all of their pending assignments in that home to
//! the lowest-scoring active member. The status flip, the ranking read and
//! the reassignment writes share one transaction so a concurrent completion
//! or second pause cannot observe or produce a stale ranking.

use domain::models::home::MemberStatus;
use domain::models::leaderboard::MemberScore;
use domain::services::reassignment::select_reassignee;
use domain::DomainError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{HomeMembershipEntity, MemberScoreEntity, MemberStatusDb};
use crate::metrics::QueryTimer;
use crate::repositories::leaderboard::current_month_year;

/// Outcome of a break toggle.
#[derive(Debug, Clone, Copy)]
pub struct ToggleOutcome {
    pub status: MemberStatus,
    pub reassigned_tasks: u64,
}

/// Repository for break-mode operations.
#[derive(Clone)]
pub struct BreakModeRepository {
    pool: PgPool,
}

impl BreakModeRepository {
    /// Creates a new BreakModeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a member's break status.
    ///
    /// With `explicit_paused` the status is set outright; otherwise the
    /// current status flips. Transitioning to paused redistributes the
    /// member's pending assignments; transitioning to active never does.
    pub async fn toggle(
        &self,
        home_id: Uuid,
        target_user_id: Uuid,
        explicit_paused: Option<bool>,
    ) -> Result<ToggleOutcome, DomainError> {
        let timer = QueryTimer::new("toggle_break");

        let mut tx = self.pool.begin().await?;

        let membership = sqlx::query_as::<_, HomeMembershipEntity>(
            r#"
            SELECT id, home_id, user_id, role, status, joined_at, updated_at
            FROM home_members
            WHERE home_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(home_id)
        .bind(target_user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound("User not found in this home.".to_string()))?;

        let current: MemberStatus = membership.status.into();
        let new_status = match explicit_paused {
            Some(true) => MemberStatus::Paused,
            Some(false) => MemberStatus::Active,
            None => current.toggled(),
        };

        let new_status_db: MemberStatusDb = new_status.into();
        sqlx::query(
            r#"
            UPDATE home_members SET status = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(membership.id)
        .bind(new_status_db)
        .execute(&mut *tx)
        .await?;

        let reassigned_tasks = if new_status == MemberStatus::Paused {
            reassign_pending(&mut tx, home_id, target_user_id).await?
        } else {
            0
        };

        tx.commit().await?;
        timer.record();

        Ok(ToggleOutcome {
            status: new_status,
            reassigned_tasks,
        })
    }
}

/// Move every pending assignment of the paused member to the lowest-scoring
/// active member of the home. Returns the number of moved assignments.
async fn reassign_pending(
    tx: &mut Transaction<'_, Postgres>,
    home_id: Uuid,
    paused_user_id: Uuid,
) -> Result<u64, DomainError> {
    let assignment_ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT ta.id
        FROM task_assignments ta
        JOIN tasks t ON ta.task_id = t.id
        WHERE t.home_id = $1
          AND ta.assigned_user_id = $2
          AND ta.status = 'pending'
        FOR UPDATE OF ta
        "#,
    )
    .bind(home_id)
    .bind(paused_user_id)
    .fetch_all(&mut **tx)
    .await?;

    if assignment_ids.is_empty() {
        return Ok(0);
    }

    let (month, year) = current_month_year();
    let pool: Vec<MemberScore> = sqlx::query_as::<_, MemberScoreEntity>(
        r#"
        SELECT hm.user_id, u.display_name, u.avatar_url,
               COALESCE(l.total_points, 0) AS total_points
        FROM home_members hm
        JOIN users u ON hm.user_id = u.id
        LEFT JOIN leaderboard_entries l
            ON l.user_id = hm.user_id
           AND l.home_id = $1
           AND l.month = $3
           AND l.year = $4
        WHERE hm.home_id = $1 AND hm.status = 'active' AND hm.user_id != $2
        "#,
    )
    .bind(home_id)
    .bind(paused_user_id)
    .bind(month)
    .bind(year)
    .fetch_all(&mut **tx)
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

    // No eligible peer: tasks stay with the paused member.
    let Some(new_assignee) = select_reassignee(&pool) else {
        return Ok(0);
    };

    sqlx::query(
        r#"
        UPDATE task_assignments
        SET assigned_user_id = $1,
            assigned_by = NULL,
            assigned_at = NOW()
        WHERE id = ANY($2)
        "#,
    )
    .bind(new_assignee.user_id)
    .bind(&assignment_ids)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO notifications (user_id, message)
        SELECT $1, 'A task has been reassigned to you because another user is on break.'
        FROM UNNEST($2::uuid[])
        "#,
    )
    .bind(new_assignee.user_id)
    .bind(&assignment_ids)
    .execute(&mut **tx)
    .await?;

    Ok(assignment_ids.len() as u64)
}
