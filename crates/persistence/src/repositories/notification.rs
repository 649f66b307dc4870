//! Notification repository for database operations.

use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Repository for notification operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a notification for a user.
    pub async fn create(&self, user_id: Uuid, message: &str) -> Result<NotificationEntity, DomainError> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, message)
            VALUES ($1, $2)
            RETURNING id, user_id, message, is_read, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// List a user's notifications, newest first, with the total count.
    pub async fn list(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
        unread_only: bool,
    ) -> Result<(Vec<NotificationEntity>, i64), DomainError> {
        let timer = QueryTimer::new("list_notifications");

        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR is_read = FALSE)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR is_read = FALSE)
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((notifications, total))
    }

    /// Mark the given notifications as read.
    ///
    /// Fails with `Forbidden` unless every id belongs to the user.
    pub async fn mark_read(&self, user_id: Uuid, ids: &[Uuid]) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("mark_notifications_read");

        let owned = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications WHERE id = ANY($1) AND user_id = $2
            "#,
        )
        .bind(ids)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if owned != ids.len() as i64 {
            return Err(DomainError::Forbidden(
                "Some notifications don't belong to the current user.".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .execute(&self.pool)
        .await?;

        timer.record();
        Ok(result.rows_affected())
    }

    /// Mark all of a user's notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("mark_all_notifications_read");
        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Delete one of the user's notifications. Returns the affected count.
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("delete_notification");
        let result = sqlx::query(
            r#"
            DELETE FROM notifications WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, DomainError> {
        let timer = QueryTimer::new("unread_notification_count");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}
