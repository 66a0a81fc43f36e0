//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, money, timestamps, roles, errors)
//! - `membership` - Members, plans, payments and the membership window calculator
//! - `training` - Trainers and workout plans
//! - `attendance` - Check-in and check-out records
//! - `goal` - Fitness goals and the goal access policy
//! - `inquiry` - Public contact-form inquiries
//! - `user` - Login accounts
//! - `dashboard` - Administrator dashboard read model

pub mod attendance;
pub mod dashboard;
pub mod foundation;
pub mod goal;
pub mod inquiry;
pub mod membership;
pub mod training;
pub mod user;
