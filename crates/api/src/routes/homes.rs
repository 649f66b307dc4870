//! Home management routes: creation, listing and membership administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::home::{
    AddMemberRequest, CreateHomeRequest, CreateHomeResponse, Home, HomeMemberResponse,
    HomeMembership, HomeRole, HomeSummary, MemberStatus, RemoveMemberResponse,
    UpdateMemberRequest, UpdateMemberResponse,
};
use domain::models::user::UserPublic;
use domain::services::membership::{require_admin, require_member, require_self_or_admin};
use persistence::repositories::{BreakModeRepository, HomeRepository, UserRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create a new home.
///
/// POST /api/v1/homes
///
/// The creator becomes the home's admin.
pub async fn create_home(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateHomeRequest>,
) -> Result<(StatusCode, Json<CreateHomeResponse>), ApiError> {
    request.validate()?;

    let repo = HomeRepository::new(state.pool.clone());
    let home = repo
        .create_home(&request.home_name, user_auth.user_id)
        .await?;

    info!(
        home_id = %home.id,
        home_name = %home.name,
        user_id = %user_auth.user_id,
        "Home created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateHomeResponse {
            home_id: home.id,
            home_name: home.name,
            your_role: HomeRole::Admin,
            created_at: home.created_at,
        }),
    ))
}

/// List homes the current user belongs to.
///
/// GET /api/v1/homes
pub async fn list_homes(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<HomeSummary>>, ApiError> {
    let repo = HomeRepository::new(state.pool.clone());
    let homes = repo.find_user_homes(user_auth.user_id).await?;

    let summaries: Vec<HomeSummary> = homes
        .into_iter()
        .map(|h| HomeSummary {
            home_id: h.id,
            home_name: h.name,
            member_count: h.member_count,
            your_role: h.role.into(),
            your_status: h.status.into(),
            joined_at: h.joined_at,
        })
        .collect();

    Ok(Json(summaries))
}

/// Get a home the current user is a member of.
///
/// GET /api/v1/homes/:home_id
pub async fn get_home(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
) -> Result<Json<Home>, ApiError> {
    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_member(membership.as_ref())?;

    let home = repo
        .find_by_id(home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;

    Ok(Json(home.into()))
}

/// Add a member to a home by email.
///
/// POST /api/v1/homes/:home_id/members
///
/// Admin only. The added user is notified.
pub async fn add_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<HomeMembership>), ApiError> {
    request.validate()?;

    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_admin(membership.as_ref())?;

    let home = repo
        .find_by_id(home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&request.user_email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    let role = request.role.unwrap_or(HomeRole::Member);
    let added = repo.add_member(home_id, &home.name, user.id, role).await?;

    info!(
        home_id = %home_id,
        user_id = %user.id,
        role = %role,
        added_by = %user_auth.user_id,
        "Member added to home"
    );

    Ok((StatusCode::CREATED, Json(added.into())))
}

/// List members of a home.
///
/// GET /api/v1/homes/:home_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
) -> Result<Json<Vec<HomeMemberResponse>>, ApiError> {
    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_member(membership.as_ref())?;

    let members = repo.list_members(home_id).await?;
    let response: Vec<HomeMemberResponse> = members
        .into_iter()
        .map(|m| HomeMemberResponse {
            user: UserPublic {
                id: m.user_id,
                display_name: m.display_name,
                avatar_url: m.avatar_url,
            },
            email: m.email,
            role: m.role.into(),
            status: m.status.into(),
            joined_at: m.joined_at,
        })
        .collect();

    Ok(Json(response))
}

/// Update a member's role or status.
///
/// PUT /api/v1/homes/:home_id/members/:user_id
///
/// Admin only. Setting the status to paused runs break-mode reassignment.
pub async fn update_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((home_id, user_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<UpdateMemberResponse>, ApiError> {
    if request.role.is_none() && request.status.is_none() {
        return Err(ApiError::Validation("No fields to update.".to_string()));
    }

    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_admin(membership.as_ref())?;

    if let Some(role) = request.role {
        let updated = repo.update_member_role(home_id, user_id, role).await?;
        if updated == 0 {
            return Err(ApiError::NotFound(
                "User not found in this home.".to_string(),
            ));
        }
    }

    let mut reassigned_tasks = 0;
    if let Some(status) = request.status {
        let outcome = BreakModeRepository::new(state.pool.clone())
            .toggle(home_id, user_id, Some(status == MemberStatus::Paused))
            .await?;
        reassigned_tasks = outcome.reassigned_tasks;
    }

    let target: HomeMembership = repo
        .get_membership(home_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found in this home.".to_string()))?
        .into();

    info!(
        home_id = %home_id,
        user_id = %user_id,
        updated_by = %user_auth.user_id,
        role = %target.role,
        status = %target.status,
        "Member updated"
    );

    Ok(Json(UpdateMemberResponse {
        user_id,
        role: target.role,
        status: target.status,
        reassigned_tasks,
    }))
}

/// Remove a member from a home.
///
/// DELETE /api/v1/homes/:home_id/members/:user_id
///
/// Admins can remove anyone; members can remove themselves.
pub async fn remove_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((home_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RemoveMemberResponse>, ApiError> {
    let repo = HomeRepository::new(state.pool.clone());

    let membership: Option<HomeMembership> = repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_self_or_admin(user_auth.user_id, user_id, membership.as_ref())?;

    let removed = repo.remove_member(home_id, user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(
            "User is not a member of this home.".to_string(),
        ));
    }

    info!(
        home_id = %home_id,
        user_id = %user_id,
        removed_by = %user_auth.user_id,
        "Member removed from home"
    );

    Ok(Json(RemoveMemberResponse {
        removed: true,
        home_id,
        user_id,
    }))
}
