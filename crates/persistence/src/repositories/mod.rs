//! Repository implementations for database operations.

pub mod break_mode;
pub mod home;
pub mod join_request;
pub mod leaderboard;
pub mod notification;
pub mod task;
pub mod template;
pub mod user;

pub use break_mode::BreakModeRepository;
pub use home::HomeRepository;
pub use join_request::JoinRequestRepository;
pub use leaderboard::LeaderboardRepository;
pub use notification::NotificationRepository;
pub use task::TaskRepository;
pub use template::TemplateRepository;
pub use user::UserRepository;

use domain::DomainError;

/// Maps a database error to the domain taxonomy.
///
/// Unique-constraint violations are recoverable validation outcomes, not
/// crashes; they are told apart by constraint name so callers surface the
/// right variant (duplicate name vs. concurrent-claim conflict).
pub(crate) fn map_db_err(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("homes_name_key") => DomainError::DuplicateName(
                    "A home with this name already exists. Choose a different name.".to_string(),
                ),
                Some("tasks_home_id_name_key") => DomainError::DuplicateName(
                    "A task with this name already exists in this home. Choose a different name."
                        .to_string(),
                ),
                Some("task_assignments_one_pending") => DomainError::Conflict(
                    "This task already has a pending assignment.".to_string(),
                ),
                Some("home_members_home_id_user_id_key") => DomainError::Conflict(
                    "User is already a member of this home.".to_string(),
                ),
                Some("home_join_requests_one_pending") => DomainError::Conflict(
                    "You already have a pending request for this home.".to_string(),
                ),
                _ => DomainError::Conflict("Resource already exists.".to_string()),
            };
        }
        if db_err.code().as_deref() == Some("23503") {
            return DomainError::NotFound("Referenced resource not found.".to_string());
        }
    }
    DomainError::Database(err)
}
