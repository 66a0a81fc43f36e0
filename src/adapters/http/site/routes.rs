use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{dashboard, home, list_inquiries, submit_inquiry};

pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
        .route("/inquiry", post(submit_inquiry))
        .route("/admin/inquiries", get(list_inquiries))
        .route("/dashboard", get(dashboard))
}
