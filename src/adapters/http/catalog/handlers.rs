//! HTTP handlers for catalog routes.

use axum::extract::{Path, State};
use axum::{Form, Json};

use crate::domain::foundation::{PlanId, TrainerId, WorkoutPlanId};
use crate::domain::membership::MembershipPlan;
use crate::domain::training::{Trainer, WorkoutPlan};

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::{PlanForm, TrainerForm, WorkoutPlanForm};

// ════════════════════════════════════════════════════════════════════════════
// Membership plans
// ════════════════════════════════════════════════════════════════════════════

pub async fn list_plans(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
) -> Result<Json<Vec<MembershipPlan>>, ApiError> {
    Ok(Json(state.plans.list().await?))
}

pub async fn add_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<PlanForm>,
) -> Result<SeeOther, ApiError> {
    state.plan_catalog().add(form.into_details()?).await?;
    Ok(SeeOther::to("/plans").success("Membership plan added successfully!"))
}

pub async fn edit_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(plan_id): Path<PlanId>,
    Form(form): Form<PlanForm>,
) -> Result<SeeOther, ApiError> {
    state.plan_catalog().edit(plan_id, form.into_details()?).await?;
    Ok(SeeOther::to("/plans").success("Membership plan updated successfully!"))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(plan_id): Path<PlanId>,
) -> Result<SeeOther, ApiError> {
    state.plan_catalog().delete(plan_id).await?;
    Ok(SeeOther::to("/plans").success("Membership plan deleted successfully!"))
}

// ════════════════════════════════════════════════════════════════════════════
// Trainers
// ════════════════════════════════════════════════════════════════════════════

pub async fn list_trainers(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
) -> Result<Json<Vec<Trainer>>, ApiError> {
    Ok(Json(state.trainers.list().await?))
}

pub async fn add_trainer(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<TrainerForm>,
) -> Result<SeeOther, ApiError> {
    state.trainer_catalog().add(form.into()).await?;
    Ok(SeeOther::to("/trainers").success("Trainer added successfully!"))
}

pub async fn edit_trainer(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(trainer_id): Path<TrainerId>,
    Form(form): Form<TrainerForm>,
) -> Result<SeeOther, ApiError> {
    state.trainer_catalog().edit(trainer_id, form.into()).await?;
    Ok(SeeOther::to("/trainers").success("Trainer updated successfully!"))
}

pub async fn delete_trainer(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(trainer_id): Path<TrainerId>,
) -> Result<SeeOther, ApiError> {
    state.trainer_catalog().delete(trainer_id).await?;
    Ok(SeeOther::to("/trainers").success("Trainer deleted successfully!"))
}

// ════════════════════════════════════════════════════════════════════════════
// Workout plans
// ════════════════════════════════════════════════════════════════════════════

pub async fn list_workout_plans(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    Ok(Json(state.workout_plans.list().await?))
}

pub async fn add_workout_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<WorkoutPlanForm>,
) -> Result<SeeOther, ApiError> {
    state.workout_plan_catalog().add(form.into()).await?;
    Ok(SeeOther::to("/workout_plans").success("Workout plan added successfully!"))
}

pub async fn edit_workout_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(workout_plan_id): Path<WorkoutPlanId>,
    Form(form): Form<WorkoutPlanForm>,
) -> Result<SeeOther, ApiError> {
    state
        .workout_plan_catalog()
        .edit(workout_plan_id, form.into())
        .await?;
    Ok(SeeOther::to("/workout_plans").success("Workout plan updated successfully!"))
}

pub async fn delete_workout_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(workout_plan_id): Path<WorkoutPlanId>,
) -> Result<SeeOther, ApiError> {
    state.workout_plan_catalog().delete(workout_plan_id).await?;
    Ok(SeeOther::to("/workout_plans").success("Workout plan deleted successfully!"))
}
