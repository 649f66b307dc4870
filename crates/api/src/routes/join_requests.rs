//! Home join-request routes: search, request, cancel, decide.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::home::HomeMembership;
use domain::models::join_request::{
    CreateJoinRequestRequest, HomeSearchResult, JoinRequest, MyJoinRequestResponse,
    PendingJoinRequestResponse, PendingJoinRequestsResponse, RespondJoinRequestRequest,
    SearchHomesQuery,
};
use domain::models::user::UserPublic;
use domain::services::membership::require_admin;
use persistence::repositories::{HomeRepository, JoinRequestRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

const SEARCH_RESULT_LIMIT: i64 = 15;

/// Search homes by name.
///
/// GET /api/v1/join-requests/search?name=
pub async fn search_homes(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<SearchHomesQuery>,
) -> Result<Json<Vec<HomeSearchResult>>, ApiError> {
    query.validate()?;

    let hits = JoinRequestRepository::new(state.pool.clone())
        .search_homes(&query.name, user_auth.user_id, SEARCH_RESULT_LIMIT)
        .await?;

    let response: Vec<HomeSearchResult> = hits
        .into_iter()
        .map(|h| HomeSearchResult {
            home_id: h.home_id,
            home_name: h.home_name,
            member_count: h.member_count,
            admin_name: h.admin_name,
            created_at: h.created_at,
            has_pending_request: h.has_pending_request,
        })
        .collect();

    Ok(Json(response))
}

/// Request to join a home.
///
/// POST /api/v1/join-requests/homes/:home_id
///
/// Home admins are notified. Existing members and duplicate pending
/// requests are rejected.
pub async fn create_request(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
    Json(request): Json<CreateJoinRequestRequest>,
) -> Result<(StatusCode, Json<JoinRequest>), ApiError> {
    request.validate()?;

    let home_repo = HomeRepository::new(state.pool.clone());
    let home = home_repo
        .find_by_id(home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;

    if home_repo
        .get_membership(home_id, user_auth.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation(
            "You are already a member of this home.".to_string(),
        ));
    }

    let created = JoinRequestRepository::new(state.pool.clone())
        .create_request(
            home_id,
            &home.name,
            user_auth.user_id,
            request.request_message.as_deref(),
        )
        .await?;

    info!(
        home_id = %home_id,
        user_id = %user_auth.user_id,
        request_id = %created.id,
        "Join request created"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the requesting user's pending join requests.
///
/// GET /api/v1/join-requests/mine
pub async fn my_requests(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<MyJoinRequestResponse>>, ApiError> {
    let requests = JoinRequestRepository::new(state.pool.clone())
        .my_pending(user_auth.user_id)
        .await?;

    let response: Vec<MyJoinRequestResponse> = requests
        .into_iter()
        .map(|r| MyJoinRequestResponse {
            request_id: r.id,
            home_id: r.home_id,
            home_name: r.home_name,
            message: r.message,
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(response))
}

/// Cancel one of the requesting user's pending join requests.
///
/// DELETE /api/v1/join-requests/:request_id
pub async fn cancel_request(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(request_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let cancelled = JoinRequestRepository::new(state.pool.clone())
        .cancel(request_id, user_auth.user_id)
        .await?;

    if cancelled == 0 {
        return Err(ApiError::NotFound(
            "Request not found or already processed.".to_string(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List pending requests across homes the requesting user administers.
///
/// GET /api/v1/join-requests/pending
pub async fn pending_requests(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<PendingJoinRequestsResponse>, ApiError> {
    let requests = JoinRequestRepository::new(state.pool.clone())
        .pending_for_admin(user_auth.user_id)
        .await?;

    let requests: Vec<PendingJoinRequestResponse> = requests
        .into_iter()
        .map(|r| PendingJoinRequestResponse {
            request_id: r.id,
            home_id: r.home_id,
            home_name: r.home_name,
            user: UserPublic {
                id: r.user_id,
                display_name: r.display_name,
                avatar_url: r.avatar_url,
            },
            email: r.email,
            message: r.message,
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(PendingJoinRequestsResponse {
        count: requests.len(),
        requests,
    }))
}

/// Accept or reject a join request.
///
/// PUT /api/v1/join-requests/:request_id
///
/// Admin of the target home only. The requester is notified either way.
pub async fn respond_to_request(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(request_id): Path<Uuid>,
    Json(request): Json<RespondJoinRequestRequest>,
) -> Result<StatusCode, ApiError> {
    if !request.status.is_decision() {
        return Err(ApiError::Validation(
            "Status must be either 'accepted' or 'rejected'.".to_string(),
        ));
    }

    let join_repo = JoinRequestRepository::new(state.pool.clone());
    let join_request = join_repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found.".to_string()))?;

    let home_repo = HomeRepository::new(state.pool.clone());
    let membership: Option<HomeMembership> = home_repo
        .get_membership(join_request.home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_admin(membership.as_ref())?;

    let home = home_repo
        .find_by_id(join_request.home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;

    join_repo
        .respond(&join_request, &home.name, request.status)
        .await?;

    info!(
        request_id = %request_id,
        home_id = %join_request.home_id,
        decided_by = %user_auth.user_id,
        decision = %request.status,
        "Join request decided"
    );

    Ok(StatusCode::NO_CONTENT)
}
