//! Task lifecycle routes: creation, assignment, completion, administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::home::HomeMembership;
use domain::models::task::{
    AssignTaskRequest, AssignTaskResponse, AssignedTaskResponse, AssignmentInfo, AssignmentOrigin,
    CompleteTaskRequest, CompleteTaskResponse, CompletionInfo, CreateTaskRequest,
    CreateTaskResponse, Task, TaskDetailResponse, TaskKind, TaskState, UpdateTaskRequest,
};
use domain::services::membership::{require_admin, require_member, require_self_or_admin};
use persistence::repositories::{HomeRepository, TaskRepository};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Fetch the actor's membership in a home as a domain model.
async fn membership_of(
    state: &AppState,
    home_id: Uuid,
    user_id: Uuid,
) -> Result<Option<HomeMembership>, ApiError> {
    let membership = HomeRepository::new(state.pool.clone())
        .get_membership(home_id, user_id)
        .await?
        .map(Into::into);
    Ok(membership)
}

/// Create a new task.
///
/// POST /api/v1/tasks
///
/// Any home member may create tasks; the task starts unclaimed and its
/// points follow the difficulty mapping.
pub async fn create_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    request.validate()?;

    let membership = membership_of(&state, request.home_id, user_auth.user_id).await?;
    require_member(membership.as_ref())?;

    let task = TaskRepository::new(state.pool.clone())
        .create_task(
            request.home_id,
            &request.task_name,
            request.description.as_deref().unwrap_or(""),
            request.difficulty_level,
            request.task_type,
            request.repeat_interval,
            user_auth.user_id,
        )
        .await?;

    info!(
        task_id = %task.id,
        home_id = %request.home_id,
        user_id = %user_auth.user_id,
        points = task.points,
        "Task created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            task_id: task.id,
            points: task.points,
        }),
    ))
}

/// List all tasks of a home.
///
/// GET /api/v1/tasks/home/:home_id
pub async fn list_home_tasks(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let membership = membership_of(&state, home_id, user_auth.user_id).await?;
    require_member(membership.as_ref())?;

    let tasks = TaskRepository::new(state.pool.clone())
        .list_by_home(home_id)
        .await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// List tasks currently assigned to the requesting user.
///
/// GET /api/v1/tasks/assigned
pub async fn list_assigned_tasks(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<AssignedTaskResponse>>, ApiError> {
    let tasks = TaskRepository::new(state.pool.clone())
        .list_assigned_to(user_auth.user_id)
        .await?;

    let response: Vec<AssignedTaskResponse> = tasks
        .into_iter()
        .map(|t| AssignedTaskResponse {
            assignment_id: t.assignment_id,
            assigned_at: t.assigned_at,
            task: Task {
                id: t.id,
                home_id: t.home_id,
                name: t.name,
                description: t.description,
                difficulty: t.difficulty.into(),
                task_type: t.task_type.into(),
                repeat_interval_days: t.repeat_interval_days,
                points: t.points,
                created_by: t.created_by,
                created_at: t.created_at,
                updated_at: t.updated_at,
            },
        })
        .collect();

    Ok(Json(response))
}

/// List unclaimed tasks of a home.
///
/// GET /api/v1/tasks/unclaimed/:home_id
pub async fn list_unclaimed_tasks(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(home_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let membership = membership_of(&state, home_id, user_auth.user_id).await?;
    require_member(membership.as_ref())?;

    let tasks = TaskRepository::new(state.pool.clone())
        .list_unclaimed(home_id)
        .await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// List tasks of a home filtered by kind.
///
/// GET /api/v1/tasks/type/:task_type/home/:home_id
pub async fn list_tasks_by_type(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((task_type, home_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let kind = TaskKind::from_str(&task_type).map_err(ApiError::Validation)?;

    let membership = membership_of(&state, home_id, user_auth.user_id).await?;
    require_member(membership.as_ref())?;

    let tasks = TaskRepository::new(state.pool.clone())
        .list_by_kind(home_id, kind)
        .await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// Assign a task to a home member.
///
/// POST /api/v1/tasks/assign
///
/// Admins may assign to anyone; members may only claim for themselves.
/// Self-claims record no assigner and send no notification.
pub async fn assign_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<AssignTaskRequest>,
) -> Result<(StatusCode, Json<AssignTaskResponse>), ApiError> {
    let task_repo = TaskRepository::new(state.pool.clone());

    let task = task_repo
        .find_by_id(request.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found.".to_string()))?;

    let membership = membership_of(&state, task.home_id, user_auth.user_id).await?;
    require_self_or_admin(
        user_auth.user_id,
        request.assigned_user_id,
        membership.as_ref(),
    )?;

    let target_membership =
        membership_of(&state, task.home_id, request.assigned_user_id).await?;
    if target_membership.is_none() {
        return Err(ApiError::Validation(
            "User is not a member of this home.".to_string(),
        ));
    }

    let origin = if request.assigned_user_id == user_auth.user_id {
        AssignmentOrigin::System
    } else {
        AssignmentOrigin::Human(user_auth.user_id)
    };

    let assignment = task_repo
        .assign(request.task_id, request.assigned_user_id, origin)
        .await?;

    info!(
        task_id = %request.task_id,
        assigned_user_id = %request.assigned_user_id,
        assigned_by = %user_auth.user_id,
        self_claim = request.assigned_user_id == user_auth.user_id,
        "Task assigned"
    );

    Ok((
        StatusCode::CREATED,
        Json(AssignTaskResponse {
            assignment_id: assignment.id,
        }),
    ))
}

/// Complete an assignment and award points.
///
/// PUT /api/v1/tasks/complete
pub async fn complete_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CompleteTaskRequest>,
) -> Result<Json<CompleteTaskResponse>, ApiError> {
    request.validate()?;

    let points = TaskRepository::new(state.pool.clone())
        .complete(
            request.assignment_id,
            user_auth.user_id,
            request.before_image_url.as_deref(),
            request.after_image_url.as_deref(),
        )
        .await?;

    info!(
        assignment_id = %request.assignment_id,
        user_id = %user_auth.user_id,
        points_awarded = points,
        "Task completed"
    );

    Ok(Json(CompleteTaskResponse {
        points_awarded: points,
    }))
}

/// Get task details with lifecycle state and completion history.
///
/// GET /api/v1/tasks/:task_id
pub async fn get_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskDetailResponse>, ApiError> {
    let task_repo = TaskRepository::new(state.pool.clone());

    let task = task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found.".to_string()))?;

    let membership = membership_of(&state, task.home_id, user_auth.user_id).await?;
    require_member(membership.as_ref())?;

    let home = HomeRepository::new(state.pool.clone())
        .find_by_id(task.home_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Home not found.".to_string()))?;

    let active = task_repo.find_active_assignment(task_id).await?;
    let completions = task_repo.recent_completions(task_id, 10).await?;

    let state_now = TaskState::derive(active.is_some(), !completions.is_empty());

    Ok(Json(TaskDetailResponse {
        task: task.into(),
        home_name: home.name,
        state: state_now,
        current_assignment: active.map(|a| AssignmentInfo {
            assignment_id: a.id,
            assigned_user_id: a.assigned_user_id,
            assigned_user_name: a.display_name,
            origin: AssignmentOrigin::from_db(a.assigned_by),
            assigned_at: a.assigned_at,
        }),
        recent_completions: completions
            .into_iter()
            .map(|c| CompletionInfo {
                assignment_id: c.assignment_id,
                completed_by: c.completed_by,
                completed_by_name: c.display_name,
                before_image_url: c.before_image_url,
                after_image_url: c.after_image_url,
                completed_at: c.completed_at,
            })
            .collect(),
    }))
}

/// Update a task.
///
/// PUT /api/v1/tasks/:task_id
///
/// Admin only. A difficulty change recomputes the points.
pub async fn update_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(task_id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("No fields to update.".to_string()));
    }

    let task_repo = TaskRepository::new(state.pool.clone());

    let task = task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found.".to_string()))?;

    let membership = membership_of(&state, task.home_id, user_auth.user_id).await?;
    require_admin(membership.as_ref())?;

    let updated = task_repo
        .update_task(
            task_id,
            request.task_name.as_deref(),
            request.description.as_deref(),
            request.difficulty_level,
            request.task_type,
            request.repeat_interval,
        )
        .await?;

    info!(
        task_id = %task_id,
        updated_by = %user_auth.user_id,
        "Task updated"
    );

    Ok(Json(updated.into()))
}

/// Delete a task. Assignments and completions cascade.
///
/// DELETE /api/v1/tasks/:task_id
///
/// Admin only.
pub async fn delete_task(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let task_repo = TaskRepository::new(state.pool.clone());

    let task = task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found.".to_string()))?;

    let membership = membership_of(&state, task.home_id, user_auth.user_id).await?;
    require_admin(membership.as_ref())?;

    task_repo.delete_task(task_id).await?;

    info!(
        task_id = %task_id,
        deleted_by = %user_auth.user_id,
        "Task deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
