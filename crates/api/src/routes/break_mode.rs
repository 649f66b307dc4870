//! Break-mode routes: pausing and resuming home members.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::home::{HomeMembership, ToggleBreakRequest, ToggleBreakResponse};
use domain::services::membership::require_admin;
use persistence::repositories::{BreakModeRepository, HomeRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Toggle a member's break status.
///
/// PUT /api/v1/break-mode/homes/:home_id/toggle-break
///
/// Users may always toggle themselves; toggling another member requires
/// admin. Pausing redistributes the member's pending tasks to the
/// lowest-scoring active member and reports how many moved.
pub async fn toggle_break(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Json(request): Json<ToggleBreakRequest>,
) -> Result<Json<ToggleBreakResponse>, ApiError> {
    // Default to toggling the requester when no target is given.
    let target_user_id = request.user_id.unwrap_or(user_auth.user_id);

    // Self-toggles need no gate; a missing membership surfaces as the
    // engine's not-found. Targeting someone else requires admin.
    if target_user_id != user_auth.user_id {
        let membership: Option<HomeMembership> = HomeRepository::new(state.pool.clone())
            .get_membership(home_id, user_auth.user_id)
            .await?
            .map(Into::into);
        require_admin(membership.as_ref())?;
    }

    let outcome = BreakModeRepository::new(state.pool.clone())
        .toggle(home_id, target_user_id, request.is_paused)
        .await?;

    info!(
        home_id = %home_id,
        user_id = %target_user_id,
        toggled_by = %user_auth.user_id,
        status = %outcome.status,
        reassigned_tasks = outcome.reassigned_tasks,
        "Break status changed"
    );

    Ok(Json(ToggleBreakResponse {
        user_id: target_user_id,
        status: outcome.status,
        reassigned_tasks: outcome.reassigned_tasks,
    }))
}
