//! Chore template domain models: a curated catalog of common chores that
//! can be instantiated as tasks in a home.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::task::Difficulty;

/// A catalog entry describing a common chore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChoreTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub repeat_interval_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing templates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTemplatesQuery {
    pub category: Option<String>,
}

/// Request payload for creating a task from a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateTaskFromTemplateRequest {
    pub home_id: Uuid,
}
