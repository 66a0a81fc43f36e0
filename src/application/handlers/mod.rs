//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler holds the ports it needs as `Arc<dyn Port>` and exposes a single
//! `handle` method. Clock readings (`today`, `now`) arrive in the command so
//! handlers stay deterministic under test.

mod accounts;
mod admin_goals;
mod attendance;
mod catalog;
mod dashboard;
mod goals;
mod inquiries;
mod members;
mod payments;
mod seed;

pub use accounts::{
    BootstrapAdminCommand, BootstrapAdminHandler, CreateAdminCommand, CreateAdminHandler,
    CreateMemberAndUserCommand, CreateMemberAndUserHandler, LoginCommand, LoginHandler,
    LoginResult,
};
pub use admin_goals::{
    AdminAddGoalCommand, AdminAddGoalHandler, AdminDeleteGoalHandler, AdminEditGoalCommand,
    AdminEditGoalHandler, AdminGoalListing, AdminListGoalsHandler,
};
pub use attendance::{
    CheckInCommand, CheckInHandler, CheckInResult, CheckOutCommand, CheckOutHandler,
    CheckOutResult, ListAttendanceHandler,
};
pub use catalog::{CatalogPorts, PlanCatalogHandler, TrainerCatalogHandler, WorkoutPlanCatalogHandler};
pub use dashboard::GetDashboardHandler;
pub use goals::{
    AddGoalCommand, AddGoalHandler, DeleteGoalCommand, DeleteGoalHandler, EditGoalCommand,
    EditGoalHandler, GetGoalHandler, GoalListing, ListGoalsHandler, UpdateProgressCommand,
    UpdateProgressHandler,
};
pub use inquiries::{ListInquiriesHandler, SubmitInquiryHandler};
pub use members::{
    AddMemberCommand, AddMemberHandler, DeleteMemberHandler, EditMemberCommand,
    EditMemberHandler, ExportMemberHandler, GetMemberHandler, MemberFile, MemberView,
};
pub use payments::{ListPaymentsHandler, RecordPaymentHandler};
pub use seed::{SeedCatalogHandler, SeedReport};

use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Severity of a notice shown after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
        }
    }
}

/// A one-off message for the user, e.g. "Payment recorded successfully!".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Runs two validations and reports every failing field from both.
pub(crate) fn validate_both<A, B>(
    first: Result<A, DomainError>,
    second: Result<B, DomainError>,
) -> Result<(A, B), DomainError> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(mut a), Err(b)) => {
            for (field, message) in b.details {
                a.details.entry(field).or_insert(message);
            }
            Err(a)
        }
    }
}
