//! Task domain models and the task lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Task difficulty. Determines the point value with a fixed mapping.
///
/// Serialized capitalized on the wire (`"Easy"`, `"Medium"`, `"Hard"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded for completing a task of this difficulty.
    pub fn points(&self) -> i32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 10,
            Difficulty::Hard => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty level: {}", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of task: routine chores or urgent one-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Regular,
    Emergency,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Regular => "regular",
            TaskKind::Emergency => "emergency",
        }
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(TaskKind::Regular),
            "emergency" => Ok(TaskKind::Emergency),
            _ => Err(format!("Invalid task type: {}", s)),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a task assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who created an assignment.
///
/// Persisted as a nullable user reference: a user id means another person
/// (a home admin) handed the task out; NULL means nobody did, because the
/// assignee claimed it themselves or break-mode redistribution moved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum AssignmentOrigin {
    Human(Uuid),
    System,
}

impl AssignmentOrigin {
    pub fn from_db(assigned_by: Option<Uuid>) -> Self {
        match assigned_by {
            Some(id) => AssignmentOrigin::Human(id),
            None => AssignmentOrigin::System,
        }
    }

    pub fn as_db(&self) -> Option<Uuid> {
        match self {
            AssignmentOrigin::Human(id) => Some(*id),
            AssignmentOrigin::System => None,
        }
    }
}

/// Lifecycle state of a task, derived from its assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Unclaimed,
    Assigned,
    Completed,
}

impl TaskState {
    /// Derives the lifecycle state.
    ///
    /// A pending assignment always wins: a completed, repeating task that
    /// has been re-assigned is `Assigned` again, not `Completed`.
    pub fn derive(has_pending_assignment: bool, has_completion: bool) -> Self {
        if has_pending_assignment {
            TaskState::Assigned
        } else if has_completion {
            TaskState::Completed
        } else {
            TaskState::Unclaimed
        }
    }
}

/// A chore belonging to a home.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: Uuid,
    pub home_id: Uuid,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub task_type: TaskKind,
    pub repeat_interval_days: Option<i32>,
    pub points: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An assignment of a task to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskAssignment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub assigned_user_id: Uuid,
    pub origin: AssignmentOrigin,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTaskRequest {
    pub home_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Task name must be between 1 and 100 characters"
    ))]
    pub task_name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub difficulty_level: Difficulty,

    #[validate(range(min = 1, max = 365, message = "Repeat interval must be 1 to 365 days"))]
    pub repeat_interval: Option<i32>,

    pub task_type: TaskKind,
}

/// Response for creating a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateTaskResponse {
    pub task_id: Uuid,
    pub points: i32,
}

/// Request payload for updating a task. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTaskRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Task name must be between 1 and 100 characters"
    ))]
    pub task_name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub difficulty_level: Option<Difficulty>,

    #[validate(range(min = 1, max = 365, message = "Repeat interval must be 1 to 365 days"))]
    pub repeat_interval: Option<i32>,

    pub task_type: Option<TaskKind>,
}

impl UpdateTaskRequest {
    /// True when no field was provided.
    pub fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.description.is_none()
            && self.difficulty_level.is_none()
            && self.repeat_interval.is_none()
            && self.task_type.is_none()
    }
}

/// Request payload for assigning a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignTaskRequest {
    pub task_id: Uuid,
    pub assigned_user_id: Uuid,
}

/// Response for assigning a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignTaskResponse {
    pub assignment_id: Uuid,
}

/// Request payload for completing an assignment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CompleteTaskRequest {
    pub assignment_id: Uuid,

    #[validate(length(max = 500, message = "Image reference must be at most 500 characters"))]
    pub before_image_url: Option<String>,

    #[validate(length(max = 500, message = "Image reference must be at most 500 characters"))]
    pub after_image_url: Option<String>,
}

/// Response for completing an assignment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CompleteTaskResponse {
    pub points_awarded: i32,
}

/// A task assigned to the requesting user, with assignment details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignedTaskResponse {
    #[serde(flatten)]
    pub task: Task,
    pub assignment_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// Active assignment details for the task detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignmentInfo {
    pub assignment_id: Uuid,
    pub assigned_user_id: Uuid,
    pub assigned_user_name: String,
    pub origin: AssignmentOrigin,
    pub assigned_at: DateTime<Utc>,
}

/// A past completion for the task detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionInfo {
    pub assignment_id: Uuid,
    pub completed_by: Uuid,
    pub completed_by_name: String,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Full task detail with lifecycle state and history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: Task,
    pub home_name: String,
    pub state: TaskState,
    pub current_assignment: Option<AssignmentInfo>,
    pub recent_completions: Vec<CompletionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_points_mapping() {
        assert_eq!(Difficulty::Easy.points(), 5);
        assert_eq!(Difficulty::Medium.points(), 10);
        assert_eq!(Difficulty::Hard.points(), 20);
    }

    #[test]
    fn test_difficulty_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).unwrap(),
            "\"Easy\""
        );
        assert_eq!(
            serde_json::to_string(&Difficulty::Hard).unwrap(),
            "\"Hard\""
        );
    }

    #[test]
    fn test_difficulty_rejects_unknown_value() {
        let result: Result<Difficulty, _> = serde_json::from_str("\"Impossible\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_difficulty_from_str_case_insensitive() {
        assert_eq!(Difficulty::from_str("easy").unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::from_str("HARD").unwrap(), Difficulty::Hard);
        assert!(Difficulty::from_str("extreme").is_err());
    }

    #[test]
    fn test_task_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskKind::Emergency).unwrap(),
            "\"emergency\""
        );
        let result: Result<TaskKind, _> = serde_json::from_str("\"urgent\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_assignment_origin_db_round_trip() {
        let id = Uuid::new_v4();
        assert_eq!(
            AssignmentOrigin::from_db(Some(id)),
            AssignmentOrigin::Human(id)
        );
        assert_eq!(AssignmentOrigin::from_db(None), AssignmentOrigin::System);
        assert_eq!(AssignmentOrigin::Human(id).as_db(), Some(id));
        assert_eq!(AssignmentOrigin::System.as_db(), None);
    }

    #[test]
    fn test_task_state_derivation() {
        assert_eq!(TaskState::derive(false, false), TaskState::Unclaimed);
        assert_eq!(TaskState::derive(true, false), TaskState::Assigned);
        assert_eq!(TaskState::derive(false, true), TaskState::Completed);
        // Re-assigned after completion: pending wins.
        assert_eq!(TaskState::derive(true, true), TaskState::Assigned);
    }

    #[test]
    fn test_create_task_request_validation() {
        let valid = CreateTaskRequest {
            home_id: Uuid::new_v4(),
            task_name: "Dishes".to_string(),
            description: None,
            difficulty_level: Difficulty::Hard,
            repeat_interval: Some(7),
            task_type: TaskKind::Regular,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateTaskRequest {
            task_name: String::new(),
            ..valid.clone()
        };
        assert!(empty_name.validate().is_err());

        let bad_interval = CreateTaskRequest {
            repeat_interval: Some(0),
            ..valid
        };
        assert!(bad_interval.validate().is_err());
    }

    #[test]
    fn test_update_task_request_is_empty() {
        let empty = UpdateTaskRequest {
            task_name: None,
            description: None,
            difficulty_level: None,
            repeat_interval: None,
            task_type: None,
        };
        assert!(empty.is_empty());

        let rename = UpdateTaskRequest {
            task_name: Some("Laundry".to_string()),
            ..empty
        };
        assert!(!rename.is_empty());
    }
}
