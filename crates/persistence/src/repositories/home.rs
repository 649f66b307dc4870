//! Home repository for database operations.

use domain::models::home::HomeRole;
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    HomeEntity, HomeMembershipEntity, HomeRoleDb, HomeWithMembershipEntity, MemberWithUserEntity,
};
use crate::metrics::QueryTimer;
use crate::repositories::map_db_err;

/// Repository for home and membership operations.
#[derive(Clone)]
pub struct HomeRepository {
    pool: PgPool,
}

impl HomeRepository {
    /// Creates a new HomeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new home and add the creator as admin.
    pub async fn create_home(
        &self,
        name: &str,
        created_by: Uuid,
    ) -> Result<HomeEntity, DomainError> {
        let timer = QueryTimer::new("create_home");

        // Home and admin membership are created atomically.
        let mut tx = self.pool.begin().await?;

        let home = sqlx::query_as::<_, HomeEntity>(
            r#"
            INSERT INTO homes (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        sqlx::query(
            r#"
            INSERT INTO home_members (home_id, user_id, role)
            VALUES ($1, $2, 'admin')
            "#,
        )
        .bind(home.id)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(home)
    }

    /// Find a home by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HomeEntity>, DomainError> {
        let timer = QueryTimer::new("find_home_by_id");
        let result = sqlx::query_as::<_, HomeEntity>(
            r#"
            SELECT id, name, created_by, created_at, updated_at
            FROM homes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Find all homes a user belongs to, with their membership info.
    pub async fn find_user_homes(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<HomeWithMembershipEntity>, DomainError> {
        let timer = QueryTimer::new("find_user_homes");
        let result = sqlx::query_as::<_, HomeWithMembershipEntity>(
            r#"
            SELECT
                h.id, h.name, h.created_by, h.created_at, h.updated_at,
                hm.role, hm.status, hm.joined_at,
                (SELECT COUNT(*) FROM home_members WHERE home_id = h.id) AS member_count
            FROM homes h
            JOIN home_members hm ON h.id = hm.home_id
            WHERE hm.user_id = $1
            ORDER BY hm.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Get a user's membership in a home.
    pub async fn get_membership(
        &self,
        home_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<HomeMembershipEntity>, DomainError> {
        let timer = QueryTimer::new("get_home_membership");
        let result = sqlx::query_as::<_, HomeMembershipEntity>(
            r#"
            SELECT id, home_id, user_id, role, status, joined_at, updated_at
            FROM home_members
            WHERE home_id = $1 AND user_id = $2
            "#,
        )
        .bind(home_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Add a member to a home and notify them.
    pub async fn add_member(
        &self,
        home_id: Uuid,
        home_name: &str,
        user_id: Uuid,
        role: HomeRole,
    ) -> Result<HomeMembershipEntity, DomainError> {
        let timer = QueryTimer::new("add_home_member");
        let role_db: HomeRoleDb = role.into();

        let mut tx = self.pool.begin().await?;

        let membership = sqlx::query_as::<_, HomeMembershipEntity>(
            r#"
            INSERT INTO home_members (home_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, home_id, user_id, role, status, joined_at, updated_at
            "#,
        )
        .bind(home_id)
        .bind(user_id)
        .bind(role_db)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, message)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(format!("You have been added to a new home: {}", home_name))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(membership)
    }

    /// Update a member's role. Returns the affected row count.
    pub async fn update_member_role(
        &self,
        home_id: Uuid,
        user_id: Uuid,
        role: HomeRole,
    ) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("update_member_role");
        let role_db: HomeRoleDb = role.into();
        let result = sqlx::query(
            r#"
            UPDATE home_members
            SET role = $3, updated_at = NOW()
            WHERE home_id = $1 AND user_id = $2
            "#,
        )
        .bind(home_id)
        .bind(user_id)
        .bind(role_db)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Remove a member from a home. Returns the affected row count.
    pub async fn remove_member(&self, home_id: Uuid, user_id: Uuid) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("remove_home_member");
        let result = sqlx::query(
            r#"
            DELETE FROM home_members
            WHERE home_id = $1 AND user_id = $2
            "#,
        )
        .bind(home_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List all members of a home with user details.
    pub async fn list_members(
        &self,
        home_id: Uuid,
    ) -> Result<Vec<MemberWithUserEntity>, DomainError> {
        let timer = QueryTimer::new("list_home_members");
        let result = sqlx::query_as::<_, MemberWithUserEntity>(
            r#"
            SELECT
                hm.user_id, u.display_name, u.email, u.avatar_url,
                hm.role, hm.status, hm.joined_at
            FROM home_members hm
            JOIN users u ON hm.user_id = u.id
            WHERE hm.home_id = $1
            ORDER BY hm.joined_at ASC
            "#,
        )
        .bind(home_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    // Note: HomeRepository requires a database connection and is covered by
    // the integration tests in crates/api/tests.
}
