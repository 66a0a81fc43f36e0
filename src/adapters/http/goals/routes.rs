use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::*;

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals))
        .route("/goals/add", post(add_goal))
        .route("/goals/edit/:id", get(get_goal).post(edit_goal))
        .route("/goals/delete/:id", post(delete_goal))
        .route("/goals/update_progress/:id", post(update_progress))
        .route("/admin/goals", get(admin_list_goals))
        .route("/admin/goals/add", post(admin_add_goal))
        .route("/admin/goals/edit/:id", get(admin_get_goal).post(admin_edit_goal))
        .route("/admin/goals/delete/:id", post(admin_delete_goal))
}
