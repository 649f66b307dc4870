//! Domain error taxonomy.
//!
//! Every core operation returns one of these variants instead of partial
//! success; the HTTP layer maps each kind to a status code.

use thiserror::Error;

/// Typed error returned by domain operations and repositories.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DomainError::Validation("bad input".into()).to_string(),
            "Validation error: bad input"
        );
        assert_eq!(
            DomainError::NotFound("task".into()).to_string(),
            "Not found: task"
        );
        assert_eq!(
            DomainError::Forbidden("admins only".into()).to_string(),
            "Forbidden: admins only"
        );
        assert_eq!(
            DomainError::DuplicateName("Dishes".into()).to_string(),
            "Duplicate name: Dishes"
        );
        assert_eq!(
            DomainError::AlreadyCompleted("assignment".into()).to_string(),
            "Already completed: assignment"
        );
        assert_eq!(
            DomainError::Conflict("claimed".into()).to_string(),
            "Conflict: claimed"
        );
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::Database(_)));
    }
}
