//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::*;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/plans/add", post(add_plan))
        .route("/plans/edit/:id", post(edit_plan))
        .route("/plans/delete/:id", post(delete_plan))
        .route("/trainers", get(list_trainers))
        .route("/trainers/add", post(add_trainer))
        .route("/trainers/edit/:id", post(edit_trainer))
        .route("/trainers/delete/:id", post(delete_trainer))
        .route("/workout_plans", get(list_workout_plans))
        .route("/workout_plans/add", post(add_workout_plan))
        .route("/workout_plans/edit/:id", post(edit_workout_plan))
        .route("/workout_plans/delete/:id", post(delete_workout_plan))
}
