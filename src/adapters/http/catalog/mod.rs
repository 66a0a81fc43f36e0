//! HTTP adapter for the catalog: membership plans, trainers and workout plans.
//!
//! Each catalog has the same shape: `GET /<catalog>` lists, `POST
//! /<catalog>/add` creates, `POST /<catalog>/edit/:id` updates and `POST
//! /<catalog>/delete/:id` removes. Listing needs a login; the rest is for
//! administrators.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{PlanForm, TrainerForm, WorkoutPlanForm};
pub use routes::catalog_routes;
