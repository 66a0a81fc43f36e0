//! HTTP adapter - the axum router over the application handlers.
//!
//! Each area has its own module with form DTOs, handlers and routes. GET
//! routes answer JSON; POST routes take form-encoded bodies and answer `303
//! See Other` carrying the notices for the next page.

pub mod accounts;
pub mod attendance;
pub mod catalog;
pub mod error;
pub mod form;
pub mod goals;
pub mod members;
pub mod middleware;
pub mod payments;
pub mod response;
pub mod site;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use response::SeeOther;
pub use state::{AppState, FullStore};

use middleware::auth_middleware;

/// Every route, with bearer-token authentication applied.
pub fn app_router(state: AppState) -> Router {
    let validator = state.session_validator.clone();

    Router::new()
        .merge(site::site_routes())
        .merge(accounts::account_routes())
        .merge(members::member_routes())
        .merge(catalog::catalog_routes())
        .merge(payments::payment_routes())
        .merge(attendance::attendance_routes())
        .merge(goals::goal_routes())
        .layer(from_fn_with_state(validator, auth_middleware))
        .with_state(state)
}
