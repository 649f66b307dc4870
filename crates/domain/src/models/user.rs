//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Public user info exposed to other home members (no email).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserPublic {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// The requesting user's own profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for updating the profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Display name must be between 1 and 50 characters"
    ))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Avatar reference must be at most 500 characters"))]
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_validation() {
        let valid = UpdateProfileRequest {
            display_name: Some("Alex".to_string()),
            avatar_url: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = UpdateProfileRequest {
            display_name: Some(String::new()),
            avatar_url: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_update_profile_is_empty() {
        let empty = UpdateProfileRequest {
            display_name: None,
            avatar_url: None,
        };
        assert!(empty.is_empty());
    }
}
