//! Join-request repository for database operations.

use domain::models::join_request::JoinRequestStatus;
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    HomeSearchEntity, JoinRequestEntity, JoinRequestStatusDb, MyJoinRequestEntity,
    PendingJoinRequestEntity,
};
use crate::metrics::QueryTimer;
use crate::repositories::map_db_err;

/// Repository for home search and join-request operations.
#[derive(Clone)]
pub struct JoinRequestRepository {
    pool: PgPool,
}

impl JoinRequestRepository {
    /// Creates a new JoinRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search homes by name fragment, flagging the searcher's pending requests.
    pub async fn search_homes(
        &self,
        name_fragment: &str,
        searcher_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HomeSearchEntity>, DomainError> {
        let timer = QueryTimer::new("search_homes");
        let pattern = format!("%{}%", name_fragment);
        let result = sqlx::query_as::<_, HomeSearchEntity>(
            r#"
            SELECT
                h.id AS home_id,
                h.name AS home_name,
                (SELECT COUNT(*) FROM home_members WHERE home_id = h.id) AS member_count,
                u.display_name AS admin_name,
                h.created_at,
                EXISTS(
                    SELECT 1 FROM home_join_requests r
                    WHERE r.home_id = h.id AND r.user_id = $2 AND r.status = 'pending'
                ) AS has_pending_request
            FROM homes h
            LEFT JOIN users u ON h.created_by = u.id
            WHERE h.name ILIKE $1
            ORDER BY h.name ASC
            LIMIT $3
            "#,
        )
        .bind(pattern)
        .bind(searcher_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Create a join request and notify the home's admins.
    pub async fn create_request(
        &self,
        home_id: Uuid,
        home_name: &str,
        user_id: Uuid,
        message: Option<&str>,
    ) -> Result<JoinRequestEntity, DomainError> {
        let timer = QueryTimer::new("create_join_request");

        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, JoinRequestEntity>(
            r#"
            INSERT INTO home_join_requests (home_id, user_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, home_id, user_id, message, status, created_at, decided_at
            "#,
        )
        .bind(home_id)
        .bind(user_id)
        .bind(message)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let requester_name = sqlx::query_scalar::<_, String>(
            r#"
            SELECT display_name FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, message)
            SELECT hm.user_id, $2
            FROM home_members hm
            WHERE hm.home_id = $1 AND hm.role = 'admin'
            "#,
        )
        .bind(home_id)
        .bind(format!(
            "{} has requested to join your home \"{}\".",
            requester_name, home_name
        ))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(request)
    }

    /// The requesting user's own pending requests, newest first.
    pub async fn my_pending(&self, user_id: Uuid) -> Result<Vec<MyJoinRequestEntity>, DomainError> {
        let timer = QueryTimer::new("my_pending_join_requests");
        let result = sqlx::query_as::<_, MyJoinRequestEntity>(
            r#"
            SELECT r.id, r.home_id, h.name AS home_name, r.message, r.created_at
            FROM home_join_requests r
            JOIN homes h ON r.home_id = h.id
            WHERE r.user_id = $1 AND r.status = 'pending'
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Cancel one of the user's own pending requests.
    pub async fn cancel(&self, request_id: Uuid, user_id: Uuid) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("cancel_join_request");
        let result = sqlx::query(
            r#"
            DELETE FROM home_join_requests
            WHERE id = $1 AND user_id = $2 AND status = 'pending'
            "#,
        )
        .bind(request_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Pending requests across all homes the user administers.
    pub async fn pending_for_admin(
        &self,
        admin_user_id: Uuid,
    ) -> Result<Vec<PendingJoinRequestEntity>, DomainError> {
        let timer = QueryTimer::new("pending_join_requests_for_admin");
        let result = sqlx::query_as::<_, PendingJoinRequestEntity>(
            r#"
            SELECT r.id, r.home_id, h.name AS home_name,
                   r.user_id, u.display_name, u.email, u.avatar_url,
                   r.message, r.created_at
            FROM home_join_requests r
            JOIN homes h ON r.home_id = h.id
            JOIN users u ON r.user_id = u.id
            WHERE r.status = 'pending'
              AND r.home_id IN (
                  SELECT home_id FROM home_members
                  WHERE user_id = $1 AND role = 'admin'
              )
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(admin_user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<JoinRequestEntity>, DomainError> {
        let timer = QueryTimer::new("find_join_request_by_id");
        let result = sqlx::query_as::<_, JoinRequestEntity>(
            r#"
            SELECT id, home_id, user_id, message, status, created_at, decided_at
            FROM home_join_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Decide a pending request.
    ///
    /// Accepting adds the requester as a member unless another admin already
    /// did; either way the requester is notified. All writes share one
    /// transaction.
    pub async fn respond(
        &self,
        request: &JoinRequestEntity,
        home_name: &str,
        decision: JoinRequestStatus,
    ) -> Result<(), DomainError> {
        let timer = QueryTimer::new("respond_join_request");
        let decision_db: JoinRequestStatusDb = decision.into();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE home_join_requests
            SET status = $2, decided_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(request.id)
        .bind(decision_db)
        .execute(&mut *tx)
        .await?;

        if decision == JoinRequestStatus::Accepted {
            sqlx::query(
                r#"
                INSERT INTO home_members (home_id, user_id, role)
                VALUES ($1, $2, 'member')
                ON CONFLICT (home_id, user_id) DO NOTHING
                "#,
            )
            .bind(request.home_id)
            .bind(request.user_id)
            .execute(&mut *tx)
            .await?;
        }

        let message = match decision {
            JoinRequestStatus::Accepted => {
                format!("Your request to join {} has been accepted.", home_name)
            }
            _ => format!("Your request to join {} has been declined.", home_name),
        };

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, message) VALUES ($1, $2)
            "#,
        )
        .bind(request.user_id)
        .bind(message)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Note: JoinRequestRepository requires a database connection and is
    // covered by the integration tests in crates/api/tests.
}
