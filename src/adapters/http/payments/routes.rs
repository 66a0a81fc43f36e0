use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{add_payment, list_payments};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments/add", post(add_payment))
}
