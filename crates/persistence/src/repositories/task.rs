//! Task repository: the task lifecycle engine.
//!
//! Tasks move Unclaimed -> Assigned -> Completed. Assignment and completion
//! are multi-row mutations and run inside single transactions; the partial
//! unique index `task_assignments_one_pending` backs the one-active-
//! assignment invariant against concurrent claims.

use domain::models::task::{AssignmentOrigin, Difficulty, TaskKind};
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    AssignedTaskEntity, AssignmentWithTaskEntity, AssignmentStatusDb, AssignmentWithUserEntity,
    CompletionWithUserEntity, DifficultyDb, TaskAssignmentEntity, TaskEntity, TaskKindDb,
};
use crate::metrics::QueryTimer;
use crate::repositories::leaderboard::{current_month_year, upsert_points};
use crate::repositories::map_db_err;

/// Repository for task lifecycle operations.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Creates a new TaskRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task in the Unclaimed state.
    ///
    /// Points are derived from the difficulty; the task name must be unique
    /// within the home.
    pub async fn create_task(
        &self,
        home_id: Uuid,
        name: &str,
        description: &str,
        difficulty: Difficulty,
        task_type: TaskKind,
        repeat_interval_days: Option<i32>,
        created_by: Uuid,
    ) -> Result<TaskEntity, DomainError> {
        let timer = QueryTimer::new("create_task");

        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM tasks WHERE home_id = $1 AND name = $2)
            "#,
        )
        .bind(home_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Err(DomainError::DuplicateName(
                "A task with this name already exists in this home. Choose a different name."
                    .to_string(),
            ));
        }

        let difficulty_db: DifficultyDb = difficulty.into();
        let task_type_db: TaskKindDb = task_type.into();

        // The unique constraint still backs the pre-check against races.
        let task = sqlx::query_as::<_, TaskEntity>(
            r#"
            INSERT INTO tasks
                (home_id, name, description, difficulty, task_type, repeat_interval_days, points, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, home_id, name, description, difficulty, task_type,
                      repeat_interval_days, points, created_by, created_at, updated_at
            "#,
        )
        .bind(home_id)
        .bind(name)
        .bind(description)
        .bind(difficulty_db)
        .bind(task_type_db)
        .bind(repeat_interval_days)
        .bind(difficulty.points())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        timer.record();
        Ok(task)
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TaskEntity>, DomainError> {
        let timer = QueryTimer::new("find_task_by_id");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, home_id, name, description, difficulty, task_type,
                   repeat_interval_days, points, created_by, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// List all tasks of a home.
    pub async fn list_by_home(&self, home_id: Uuid) -> Result<Vec<TaskEntity>, DomainError> {
        let timer = QueryTimer::new("list_tasks_by_home");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, home_id, name, description, difficulty, task_type,
                   repeat_interval_days, points, created_by, created_at, updated_at
            FROM tasks
            WHERE home_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(home_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// List tasks of a home filtered by kind.
    pub async fn list_by_kind(
        &self,
        home_id: Uuid,
        task_type: TaskKind,
    ) -> Result<Vec<TaskEntity>, DomainError> {
        let timer = QueryTimer::new("list_tasks_by_kind");
        let task_type_db: TaskKindDb = task_type.into();
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT id, home_id, name, description, difficulty, task_type,
                   repeat_interval_days, points, created_by, created_at, updated_at
            FROM tasks
            WHERE home_id = $1 AND task_type = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(home_id)
        .bind(task_type_db)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// List tasks of a home with no pending assignment.
    pub async fn list_unclaimed(&self, home_id: Uuid) -> Result<Vec<TaskEntity>, DomainError> {
        let timer = QueryTimer::new("list_unclaimed_tasks");
        let result = sqlx::query_as::<_, TaskEntity>(
            r#"
            SELECT t.id, t.home_id, t.name, t.description, t.difficulty, t.task_type,
                   t.repeat_interval_days, t.points, t.created_by, t.created_at, t.updated_at
            FROM tasks t
            WHERE t.home_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM task_assignments ta
                  WHERE ta.task_id = t.id AND ta.status = 'pending'
              )
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(home_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// List tasks with a pending assignment to the given user.
    pub async fn list_assigned_to(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AssignedTaskEntity>, DomainError> {
        let timer = QueryTimer::new("list_assigned_tasks");
        let result = sqlx::query_as::<_, AssignedTaskEntity>(
            r#"
            SELECT t.id, t.home_id, t.name, t.description, t.difficulty, t.task_type,
                   t.repeat_interval_days, t.points, t.created_by, t.created_at, t.updated_at,
                   ta.id AS assignment_id, ta.assigned_at
            FROM tasks t
            JOIN task_assignments ta ON t.id = ta.task_id
            WHERE ta.assigned_user_id = $1 AND ta.status = 'pending'
            ORDER BY ta.assigned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Create a pending assignment for a task.
    ///
    /// Fails with `Conflict` if the task already has a pending assignment.
    /// When the origin is another person (admin assignment), a notification
    /// to the assignee is written in the same transaction.
    pub async fn assign(
        &self,
        task_id: Uuid,
        assigned_user_id: Uuid,
        origin: AssignmentOrigin,
    ) -> Result<TaskAssignmentEntity, DomainError> {
        let timer = QueryTimer::new("assign_task");

        let mut tx = self.pool.begin().await?;

        let pending = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM task_assignments
            WHERE task_id = $1 AND status = 'pending'
            FOR UPDATE
            "#,
        )
        .bind(task_id)
        .fetch_optional(&mut *tx)
        .await?;

        if pending.is_some() {
            return Err(DomainError::Conflict(
                "This task already has a pending assignment.".to_string(),
            ));
        }

        let assignment = sqlx::query_as::<_, TaskAssignmentEntity>(
            r#"
            INSERT INTO task_assignments (task_id, assigned_user_id, assigned_by)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, assigned_user_id, assigned_by, status, assigned_at
            "#,
        )
        .bind(task_id)
        .bind(assigned_user_id)
        .bind(origin.as_db())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        if matches!(origin, AssignmentOrigin::Human(_)) {
            sqlx::query(
                r#"
                INSERT INTO notifications (user_id, message)
                VALUES ($1, 'You have been assigned a new task.')
                "#,
            )
            .bind(assigned_user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(assignment)
    }

    /// Complete an assignment, record the completion and award points.
    ///
    /// The assignment row is locked for the duration of the transaction so a
    /// concurrent completion or break-mode reassignment cannot interleave.
    /// Returns the points awarded.
    pub async fn complete(
        &self,
        assignment_id: Uuid,
        requester: Uuid,
        before_image_url: Option<&str>,
        after_image_url: Option<&str>,
    ) -> Result<i32, DomainError> {
        let timer = QueryTimer::new("complete_task");

        let mut tx = self.pool.begin().await?;

        let assignment = sqlx::query_as::<_, AssignmentWithTaskEntity>(
            r#"
            SELECT ta.id, ta.task_id, ta.assigned_user_id, ta.status, t.points, t.home_id
            FROM task_assignments ta
            JOIN tasks t ON ta.task_id = t.id
            WHERE ta.id = $1
            FOR UPDATE OF ta
            "#,
        )
        .bind(assignment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound("Assignment not found.".to_string()))?;

        if assignment.assigned_user_id != requester {
            return Err(DomainError::Forbidden(
                "You can only complete tasks assigned to you.".to_string(),
            ));
        }

        if assignment.status == AssignmentStatusDb::Completed {
            return Err(DomainError::AlreadyCompleted(
                "Task is already marked as completed.".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE task_assignments SET status = 'completed' WHERE id = $1
            "#,
        )
        .bind(assignment_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO task_completions
                (assignment_id, completed_by, before_image_url, after_image_url)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(assignment_id)
        .bind(requester)
        .bind(before_image_url)
        .bind(after_image_url)
        .execute(&mut *tx)
        .await?;

        let (month, year) = current_month_year();
        upsert_points(
            &mut *tx,
            assignment.home_id,
            requester,
            month,
            year,
            assignment.points as i64,
        )
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(assignment.points)
    }

    /// Update a task. Points are recomputed when the difficulty changes.
    pub async fn update_task(
        &self,
        task_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        difficulty: Option<Difficulty>,
        task_type: Option<TaskKind>,
        repeat_interval_days: Option<i32>,
    ) -> Result<TaskEntity, DomainError> {
        let timer = QueryTimer::new("update_task");

        let mut tx = self.pool.begin().await?;

        let home_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT home_id FROM tasks WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(task_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound("Task not found.".to_string()))?;

        if let Some(new_name) = name {
            let taken = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM tasks WHERE home_id = $1 AND name = $2 AND id != $3
                )
                "#,
            )
            .bind(home_id)
            .bind(new_name)
            .bind(task_id)
            .fetch_one(&mut *tx)
            .await?;

            if taken {
                return Err(DomainError::DuplicateName(
                    "A task with this name already exists in this home. Choose a different name."
                        .to_string(),
                ));
            }
        }

        let difficulty_db: Option<DifficultyDb> = difficulty.map(Into::into);
        let task_type_db: Option<TaskKindDb> = task_type.map(Into::into);

        let task = sqlx::query_as::<_, TaskEntity>(
            r#"
            UPDATE tasks
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                task_type = COALESCE($5, task_type),
                repeat_interval_days = COALESCE($6, repeat_interval_days),
                points = COALESCE($7, points),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, home_id, name, description, difficulty, task_type,
                      repeat_interval_days, points, created_by, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(name)
        .bind(description)
        .bind(difficulty_db)
        .bind(task_type_db)
        .bind(repeat_interval_days)
        .bind(difficulty.map(|d| d.points()))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        tx.commit().await?;
        timer.record();
        Ok(task)
    }

    /// Delete a task. Assignments and completions cascade.
    pub async fn delete_task(&self, task_id: Uuid) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("delete_task");
        let result = sqlx::query(
            r#"
            DELETE FROM tasks WHERE id = $1
            "#,
        )
        .bind(task_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Get the pending assignment of a task with assignee info, if any.
    pub async fn find_active_assignment(
        &self,
        task_id: Uuid,
    ) -> Result<Option<AssignmentWithUserEntity>, DomainError> {
        let timer = QueryTimer::new("find_active_assignment");
        let result = sqlx::query_as::<_, AssignmentWithUserEntity>(
            r#"
            SELECT ta.id, ta.assigned_user_id, ta.assigned_by, ta.assigned_at, u.display_name
            FROM task_assignments ta
            JOIN users u ON ta.assigned_user_id = u.id
            WHERE ta.task_id = $1 AND ta.status = 'pending'
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Get recent completions of a task with completer info.
    pub async fn recent_completions(
        &self,
        task_id: Uuid,
        limit: i64,
    ) -> Result<Vec<CompletionWithUserEntity>, DomainError> {
        let timer = QueryTimer::new("recent_completions");
        let result = sqlx::query_as::<_, CompletionWithUserEntity>(
            r#"
            SELECT tc.assignment_id, tc.completed_by, tc.before_image_url,
                   tc.after_image_url, tc.completed_at, u.display_name
            FROM task_completions tc
            JOIN task_assignments ta ON tc.assignment_id = ta.id
            JOIN users u ON tc.completed_by = u.id
            WHERE ta.task_id = $1
            ORDER BY tc.completed_at DESC
            LIMIT $2
            "#,
        )
        .bind(task_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }
}
