//! HTTP handlers for goal routes.

use axum::extract::{Path, Query, State};
use axum::{Form, Json};

use crate::application::handlers::{
    AddGoalCommand, AdminAddGoalCommand, AdminEditGoalCommand, AdminGoalListing, DeleteGoalCommand,
    EditGoalCommand, GoalListing, UpdateProgressCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode, GoalId, Timestamp};
use crate::domain::goal::Goal;

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::{AdminGoalForm, AdminGoalQuery, GoalForm, ProgressForm};

// ════════════════════════════════════════════════════════════════════════════
// Self-service
// ════════════════════════════════════════════════════════════════════════════

/// GET /goals
pub async fn list_goals(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<Json<GoalListing>, ApiError> {
    Ok(Json(state.list_goals_handler().handle(&actor).await?))
}

/// POST /goals/add - always owned by the caller
pub async fn add_goal(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Form(form): Form<GoalForm>,
) -> Result<SeeOther, ApiError> {
    state
        .add_goal_handler()
        .handle(AddGoalCommand {
            actor,
            details: form.into_details()?,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/goals").success("Goal added successfully!"))
}

/// GET /goals/edit/:id - the goal to prefill the edit form
pub async fn get_goal(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(goal_id): Path<GoalId>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.get_goal_handler().handle(&actor, goal_id).await?))
}

/// POST /goals/edit/:id
pub async fn edit_goal(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(goal_id): Path<GoalId>,
    Form(form): Form<GoalForm>,
) -> Result<SeeOther, ApiError> {
    state
        .edit_goal_handler()
        .handle(EditGoalCommand {
            actor,
            goal_id,
            details: form.into_details()?,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/goals").success("Goal updated successfully!"))
}

/// POST /goals/delete/:id
pub async fn delete_goal(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(goal_id): Path<GoalId>,
) -> Result<SeeOther, ApiError> {
    state
        .delete_goal_handler()
        .handle(DeleteGoalCommand { actor, goal_id })
        .await?;
    Ok(SeeOther::to("/goals").success("Goal deleted successfully!"))
}

/// POST /goals/update_progress/:id
pub async fn update_progress(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(goal_id): Path<GoalId>,
    Form(form): Form<ProgressForm>,
) -> Result<SeeOther, ApiError> {
    state
        .update_progress_handler()
        .handle(UpdateProgressCommand {
            actor,
            goal_id,
            progress: form.current_value,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/goals").success("Goal progress updated successfully!"))
}

// ════════════════════════════════════════════════════════════════════════════
// Administrator
// ════════════════════════════════════════════════════════════════════════════

/// GET /admin/goals?user_id=
pub async fn admin_list_goals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminGoalQuery>,
) -> Result<Json<AdminGoalListing>, ApiError> {
    let listing = state
        .admin_list_goals_handler()
        .handle(query.user_filter()?)
        .await?;
    Ok(Json(listing))
}

/// POST /admin/goals/add
pub async fn admin_add_goal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<AdminGoalForm>,
) -> Result<SeeOther, ApiError> {
    state
        .admin_add_goal_handler()
        .handle(AdminAddGoalCommand {
            assignment: form.into_assignment()?,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/admin/goals").success("Admin goal added successfully!"))
}

/// GET /admin/goals/edit/:id
pub async fn admin_get_goal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(goal_id): Path<GoalId>,
) -> Result<Json<Goal>, ApiError> {
    let goal = state
        .goals
        .find_by_id(goal_id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::GoalNotFound, "Goal", goal_id))?;
    Ok(Json(goal))
}

/// POST /admin/goals/edit/:id
pub async fn admin_edit_goal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(goal_id): Path<GoalId>,
    Form(form): Form<AdminGoalForm>,
) -> Result<SeeOther, ApiError> {
    state
        .admin_edit_goal_handler()
        .handle(AdminEditGoalCommand {
            goal_id,
            assignment: form.into_assignment()?,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/admin/goals").success("Goal updated successfully!"))
}

/// POST /admin/goals/delete/:id
pub async fn admin_delete_goal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(goal_id): Path<GoalId>,
) -> Result<SeeOther, ApiError> {
    state.admin_delete_goal_handler().handle(goal_id).await?;
    Ok(SeeOther::to("/admin/goals").success("Goal deleted successfully!"))
}
