//! Chore template routes: catalog browsing and task instantiation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::home::HomeMembership;
use domain::models::task::CreateTaskResponse;
use domain::models::template::{
    ChoreTemplate, CreateTaskFromTemplateRequest, ListTemplatesQuery,
};
use domain::services::membership::require_member;
use persistence::repositories::{HomeRepository, TaskRepository, TemplateRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// List the template catalog, optionally by category.
///
/// GET /api/v1/templates
pub async fn list_templates(
    State(state): State<AppState>,
    _user_auth: UserAuth,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<Vec<ChoreTemplate>>, ApiError> {
    let templates = TemplateRepository::new(state.pool.clone())
        .list(query.category.as_deref())
        .await?;
    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

/// Get a single template.
///
/// GET /api/v1/templates/:template_id
pub async fn get_template(
    State(state): State<AppState>,
    _user_auth: UserAuth,
    Path(template_id): Path<Uuid>,
) -> Result<Json<ChoreTemplate>, ApiError> {
    let template = TemplateRepository::new(state.pool.clone())
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found.".to_string()))?;
    Ok(Json(template.into()))
}

/// Create a task in a home from a template.
///
/// POST /api/v1/templates/:template_id/create-task
///
/// Follows the same rules as direct task creation: membership required,
/// name unique within the home, points from the difficulty mapping.
pub async fn create_task_from_template(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(template_id): Path<Uuid>,
    Json(request): Json<CreateTaskFromTemplateRequest>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    let membership: Option<HomeMembership> = HomeRepository::new(state.pool.clone())
        .get_membership(request.home_id, user_auth.user_id)
        .await?
        .map(Into::into);
    require_member(membership.as_ref())?;

    let template = TemplateRepository::new(state.pool.clone())
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found.".to_string()))?;

    let difficulty = template.difficulty.into();
    let task = TaskRepository::new(state.pool.clone())
        .create_task(
            request.home_id,
            &template.name,
            &template.description,
            difficulty,
            domain::models::task::TaskKind::Regular,
            template.repeat_interval_days,
            user_auth.user_id,
        )
        .await?;

    info!(
        template_id = %template_id,
        task_id = %task.id,
        home_id = %request.home_id,
        user_id = %user_auth.user_id,
        "Task created from template"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            task_id: task.id,
            points: task.points,
        }),
    ))
}
