//! Chore template entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::template::ChoreTemplate;
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::task::DifficultyDb;

/// Database row mapping for the chore_templates table.
#[derive(Debug, Clone, FromRow)]
pub struct ChoreTemplateEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: DifficultyDb,
    pub repeat_interval_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<ChoreTemplateEntity> for ChoreTemplate {
    fn from(entity: ChoreTemplateEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            difficulty: entity.difficulty.into(),
            repeat_interval_days: entity.repeat_interval_days,
            created_at: entity.created_at,
        }
    }
}
