//! Axum router configuration for member endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{add_member, delete_member, edit_member, export_member, list_members, view_member};

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members))
        .route("/members/add", post(add_member))
        .route("/members/:id", get(view_member))
        .route("/members/edit/:id", post(edit_member))
        .route("/members/export/:id", get(export_member))
        .route("/members/delete/:id", post(delete_member))
}
