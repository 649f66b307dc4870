//! Task entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::task::{
    AssignmentOrigin, AssignmentStatus, Difficulty, Task, TaskAssignment, TaskKind,
};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for task_difficulty that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_difficulty", rename_all = "lowercase")]
pub enum DifficultyDb {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyDb> for Difficulty {
    fn from(db: DifficultyDb) -> Self {
        match db {
            DifficultyDb::Easy => Difficulty::Easy,
            DifficultyDb::Medium => Difficulty::Medium,
            DifficultyDb::Hard => Difficulty::Hard,
        }
    }
}

impl From<Difficulty> for DifficultyDb {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => DifficultyDb::Easy,
            Difficulty::Medium => DifficultyDb::Medium,
            Difficulty::Hard => DifficultyDb::Hard,
        }
    }
}

/// Database enum for task_kind that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_kind", rename_all = "lowercase")]
pub enum TaskKindDb {
    Regular,
    Emergency,
}

impl From<TaskKindDb> for TaskKind {
    fn from(db: TaskKindDb) -> Self {
        match db {
            TaskKindDb::Regular => TaskKind::Regular,
            TaskKindDb::Emergency => TaskKind::Emergency,
        }
    }
}

impl From<TaskKind> for TaskKindDb {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Regular => TaskKindDb::Regular,
            TaskKind::Emergency => TaskKindDb::Emergency,
        }
    }
}

/// Database enum for assignment_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "lowercase")]
pub enum AssignmentStatusDb {
    Pending,
    Completed,
}

impl From<AssignmentStatusDb> for AssignmentStatus {
    fn from(db: AssignmentStatusDb) -> Self {
        match db {
            AssignmentStatusDb::Pending => AssignmentStatus::Pending,
            AssignmentStatusDb::Completed => AssignmentStatus::Completed,
        }
    }
}

/// Database row mapping for the tasks table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub name: String,
    pub description: String,
    pub difficulty: DifficultyDb,
    pub task_type: TaskKindDb,
    pub repeat_interval_days: Option<i32>,
    pub points: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskEntity> for Task {
    fn from(entity: TaskEntity) -> Self {
        Self {
            id: entity.id,
            home_id: entity.home_id,
            name: entity.name,
            description: entity.description,
            difficulty: entity.difficulty.into(),
            task_type: entity.task_type.into(),
            repeat_interval_days: entity.repeat_interval_days,
            points: entity.points,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the task_assignments table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskAssignmentEntity {
    pub id: Uuid,
    pub task_id: Uuid,
    pub assigned_user_id: Uuid,
    pub assigned_by: Option<Uuid>,
    pub status: AssignmentStatusDb,
    pub assigned_at: DateTime<Utc>,
}

impl From<TaskAssignmentEntity> for TaskAssignment {
    fn from(entity: TaskAssignmentEntity) -> Self {
        Self {
            id: entity.id,
            task_id: entity.task_id,
            assigned_user_id: entity.assigned_user_id,
            origin: AssignmentOrigin::from_db(entity.assigned_by),
            status: entity.status.into(),
            assigned_at: entity.assigned_at,
        }
    }
}

/// Assignment row joined with its task, for the completion flow.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentWithTaskEntity {
    pub id: Uuid,
    pub task_id: Uuid,
    pub assigned_user_id: Uuid,
    pub status: AssignmentStatusDb,
    pub points: i32,
    pub home_id: Uuid,
}

/// Task row joined with its pending assignment, for "my tasks" listings.
#[derive(Debug, Clone, FromRow)]
pub struct AssignedTaskEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub name: String,
    pub description: String,
    pub difficulty: DifficultyDb,
    pub task_type: TaskKindDb,
    pub repeat_interval_days: Option<i32>,
    pub points: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Assignment fields
    pub assignment_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// Active assignment joined with the assignee, for the task detail view.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentWithUserEntity {
    pub id: Uuid,
    pub assigned_user_id: Uuid,
    pub assigned_by: Option<Uuid>,
    pub assigned_at: DateTime<Utc>,
    pub display_name: String,
}

/// Completion row joined with the completing user, for the task detail view.
#[derive(Debug, Clone, FromRow)]
pub struct CompletionWithUserEntity {
    pub assignment_id: Uuid,
    pub completed_by: Uuid,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub display_name: String,
}
