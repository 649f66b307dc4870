//! Chore template repository for database operations.

use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ChoreTemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for the chore template catalog.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Creates a new TemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List templates, optionally filtered by category.
    pub async fn list(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ChoreTemplateEntity>, DomainError> {
        let timer = QueryTimer::new("list_chore_templates");
        let result = sqlx::query_as::<_, ChoreTemplateEntity>(
            r#"
            SELECT id, name, description, category, difficulty,
                   repeat_interval_days, created_at
            FROM chore_templates
            WHERE $1::text IS NULL OR category = $1
            ORDER BY category ASC, name ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Find a template by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ChoreTemplateEntity>, DomainError> {
        let timer = QueryTimer::new("find_chore_template_by_id");
        let result = sqlx::query_as::<_, ChoreTemplateEntity>(
            r#"
            SELECT id, name, description, category, difficulty,
                   repeat_interval_days, created_at
            FROM chore_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    // Note: TemplateRepository requires a database connection and is covered
    // by the integration tests in crates/api/tests.
}
