//! User profile routes.

use axum::{extract::State, Json};
use domain::models::user::{UpdateProfileRequest, UserProfile};
use persistence::repositories::UserRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Get the requesting user's profile.
///
/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<UserProfile>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    Ok(Json(user.into()))
}

/// Update the requesting user's profile.
///
/// PUT /api/v1/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("No fields to update.".to_string()));
    }

    let user = UserRepository::new(state.pool.clone())
        .update_profile(
            user_auth.user_id,
            request.display_name.as_deref(),
            request.avatar_url.as_deref(),
        )
        .await?;

    info!(user_id = %user_auth.user_id, "Profile updated");

    Ok(Json(user.into()))
}
