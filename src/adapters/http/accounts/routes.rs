use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{create_admin, create_member_and_user, login, logout};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/admin/create_admin", post(create_admin))
        .route("/admin/create_member_and_user", post(create_member_and_user))
}
