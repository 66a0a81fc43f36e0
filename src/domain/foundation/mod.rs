//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the actor/role vocabulary and error
//! types used by every other domain module.

mod auth;
mod errors;
mod ids;
mod money;
mod timestamp;
pub mod text;

pub use auth::{Actor, AuthError, Role, UnknownRole};
pub use errors::{DomainError, ErrorCode, FieldErrors, ValidationError};
pub use ids::{
    AttendanceId, GoalId, InquiryId, MemberId, PaymentId, PlanId, TrainerId, UserId,
    WorkoutPlanId,
};
pub use money::Money;
pub use timestamp::Timestamp;
