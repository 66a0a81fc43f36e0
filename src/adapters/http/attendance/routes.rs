use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{check_in, check_out, list_attendance};

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(list_attendance))
        .route("/attendance/checkin", post(check_in))
        .route("/attendance/checkout/:id", post(check_out))
}
