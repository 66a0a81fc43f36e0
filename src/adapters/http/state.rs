//! Shared application state for the HTTP routes.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::application::handlers::{
    AddGoalHandler, AddMemberHandler, AdminAddGoalHandler, AdminDeleteGoalHandler,
    AdminEditGoalHandler, AdminListGoalsHandler, CatalogPorts, CheckInHandler, CheckOutHandler,
    CreateAdminHandler, CreateMemberAndUserHandler, DeleteGoalHandler, DeleteMemberHandler,
    EditGoalHandler, EditMemberHandler, ExportMemberHandler, GetDashboardHandler, GetGoalHandler,
    GetMemberHandler, ListAttendanceHandler, ListGoalsHandler, ListInquiriesHandler,
    ListPaymentsHandler, LoginHandler, PlanCatalogHandler, RecordPaymentHandler,
    SubmitInquiryHandler, TrainerCatalogHandler, UpdateProgressHandler,
    WorkoutPlanCatalogHandler,
};
use crate::adapters::postgres::{
    PostgresAttendanceRepository, PostgresCatalogRepository, PostgresDashboardReader,
    PostgresGoalRepository, PostgresInquiryRepository, PostgresMemberRepository,
    PostgresPaymentRepository, PostgresUserRepository,
};
use crate::domain::foundation::Timestamp;
use crate::ports::{
    AttendanceRepository, DashboardReader, GoalRepository, InquiryRepository, MemberRepository,
    PasswordHasher, PaymentRepository, PlanRepository, SessionIssuer, SessionValidator,
    TrainerRepository, UserRepository, WorkoutPlanRepository,
};

/// Every port the routes need. Cloned per request; all fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub trainers: Arc<dyn TrainerRepository>,
    pub workout_plans: Arc<dyn WorkoutPlanRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub goals: Arc<dyn GoalRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub dashboard: Arc<dyn DashboardReader>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
}

/// A store that implements every persistence port, such as the in-memory one.
pub trait FullStore:
    MemberRepository
    + PlanRepository
    + TrainerRepository
    + WorkoutPlanRepository
    + PaymentRepository
    + AttendanceRepository
    + GoalRepository
    + InquiryRepository
    + UserRepository
    + DashboardReader
    + 'static
{
}

impl<T> FullStore for T where
    T: MemberRepository
        + PlanRepository
        + TrainerRepository
        + WorkoutPlanRepository
        + PaymentRepository
        + AttendanceRepository
        + GoalRepository
        + InquiryRepository
        + UserRepository
        + DashboardReader
        + 'static
{
}

impl AppState {
    /// Builds the state from one store backing every repository.
    pub fn from_store<S: FullStore>(
        store: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        session_issuer: Arc<dyn SessionIssuer>,
        session_validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            members: store.clone(),
            plans: store.clone(),
            trainers: store.clone(),
            workout_plans: store.clone(),
            payments: store.clone(),
            attendance: store.clone(),
            goals: store.clone(),
            inquiries: store.clone(),
            users: store.clone(),
            dashboard: store,
            hasher,
            session_issuer,
            session_validator,
        }
    }

    /// Builds the state over the PostgreSQL repositories sharing `pool`.
    pub fn from_pool(
        pool: PgPool,
        hasher: Arc<dyn PasswordHasher>,
        session_issuer: Arc<dyn SessionIssuer>,
        session_validator: Arc<dyn SessionValidator>,
    ) -> Self {
        let catalog = Arc::new(PostgresCatalogRepository::new(pool.clone()));
        Self {
            members: Arc::new(PostgresMemberRepository::new(pool.clone())),
            plans: catalog.clone(),
            trainers: catalog.clone(),
            workout_plans: catalog,
            payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
            goals: Arc::new(PostgresGoalRepository::new(pool.clone())),
            inquiries: Arc::new(PostgresInquiryRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            dashboard: Arc::new(PostgresDashboardReader::new(pool)),
            hasher,
            session_issuer,
            session_validator,
        }
    }

    /// The current date in UTC, used for membership and dashboard checks.
    pub fn today(&self) -> NaiveDate {
        Timestamp::now().date()
    }

    pub fn catalog(&self) -> CatalogPorts {
        CatalogPorts::new(
            self.plans.clone(),
            self.trainers.clone(),
            self.workout_plans.clone(),
        )
    }

    // Accounts

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.session_issuer.clone(),
        )
    }

    pub fn create_admin_handler(&self) -> CreateAdminHandler {
        CreateAdminHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn create_member_and_user_handler(&self) -> CreateMemberAndUserHandler {
        CreateMemberAndUserHandler::new(self.members.clone(), self.catalog(), self.hasher.clone())
    }

    // Site

    pub fn dashboard_handler(&self) -> GetDashboardHandler {
        GetDashboardHandler::new(self.dashboard.clone(), self.members.clone())
    }

    pub fn submit_inquiry_handler(&self) -> SubmitInquiryHandler {
        SubmitInquiryHandler::new(self.inquiries.clone())
    }

    pub fn list_inquiries_handler(&self) -> ListInquiriesHandler {
        ListInquiriesHandler::new(self.inquiries.clone())
    }

    // Members

    pub fn add_member_handler(&self) -> AddMemberHandler {
        AddMemberHandler::new(self.members.clone(), self.catalog())
    }

    pub fn edit_member_handler(&self) -> EditMemberHandler {
        EditMemberHandler::new(self.members.clone(), self.catalog())
    }

    pub fn delete_member_handler(&self) -> DeleteMemberHandler {
        DeleteMemberHandler::new(self.members.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.members.clone(), self.catalog())
    }

    pub fn export_member_handler(&self) -> ExportMemberHandler {
        ExportMemberHandler::new(self.members.clone(), self.catalog())
    }

    // Catalog

    pub fn plan_catalog(&self) -> PlanCatalogHandler {
        PlanCatalogHandler::new(self.plans.clone())
    }

    pub fn trainer_catalog(&self) -> TrainerCatalogHandler {
        TrainerCatalogHandler::new(self.trainers.clone())
    }

    pub fn workout_plan_catalog(&self) -> WorkoutPlanCatalogHandler {
        WorkoutPlanCatalogHandler::new(self.workout_plans.clone())
    }

    // Payments and attendance

    pub fn record_payment_handler(&self) -> RecordPaymentHandler {
        RecordPaymentHandler::new(self.payments.clone(), self.members.clone(), self.plans.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.payments.clone())
    }

    pub fn check_in_handler(&self) -> CheckInHandler {
        CheckInHandler::new(self.attendance.clone(), self.members.clone())
    }

    pub fn check_out_handler(&self) -> CheckOutHandler {
        CheckOutHandler::new(self.attendance.clone(), self.members.clone())
    }

    pub fn list_attendance_handler(&self) -> ListAttendanceHandler {
        ListAttendanceHandler::new(self.attendance.clone())
    }

    // Goals

    pub fn list_goals_handler(&self) -> ListGoalsHandler {
        ListGoalsHandler::new(self.goals.clone())
    }

    pub fn add_goal_handler(&self) -> AddGoalHandler {
        AddGoalHandler::new(self.goals.clone())
    }

    pub fn get_goal_handler(&self) -> GetGoalHandler {
        GetGoalHandler::new(self.goals.clone())
    }

    pub fn edit_goal_handler(&self) -> EditGoalHandler {
        EditGoalHandler::new(self.goals.clone())
    }

    pub fn delete_goal_handler(&self) -> DeleteGoalHandler {
        DeleteGoalHandler::new(self.goals.clone())
    }

    pub fn update_progress_handler(&self) -> UpdateProgressHandler {
        UpdateProgressHandler::new(self.goals.clone())
    }

    pub fn admin_list_goals_handler(&self) -> AdminListGoalsHandler {
        AdminListGoalsHandler::new(self.goals.clone(), self.users.clone())
    }

    pub fn admin_add_goal_handler(&self) -> AdminAddGoalHandler {
        AdminAddGoalHandler::new(self.goals.clone())
    }

    pub fn admin_edit_goal_handler(&self) -> AdminEditGoalHandler {
        AdminEditGoalHandler::new(self.goals.clone())
    }

    pub fn admin_delete_goal_handler(&self) -> AdminDeleteGoalHandler {
        AdminDeleteGoalHandler::new(self.goals.clone())
    }
}
