//! HTTP adapter for fitness goals.
//!
//! Self-service routes act on the caller's own goals, with
//! administrators allowed through by the goal access policy:
//!
//! - `GET /goals`, `POST /goals/add`
//! - `GET|POST /goals/edit/:id`, `POST /goals/delete/:id`
//! - `POST /goals/update_progress/:id`
//!
//! Administrator routes manage goals for any user:
//!
//! - `GET /admin/goals?user_id=`, `POST /admin/goals/add`
//! - `GET|POST /admin/goals/edit/:id`, `POST /admin/goals/delete/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AdminGoalForm, AdminGoalQuery, GoalForm, ProgressForm};
pub use routes::goal_routes;
