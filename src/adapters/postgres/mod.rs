//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresMemberRepository` - Members, member + account inserts, dashboard counts
//! - `PostgresCatalogRepository` - Plans, trainers and workout plans
//! - `PostgresPaymentRepository` - Payments recorded with the renewed window
//! - `PostgresAttendanceRepository`, `PostgresGoalRepository`,
//!   `PostgresInquiryRepository`, `PostgresUserRepository`
//!
//! The schema lives in `migrations/` and is applied at startup.

mod attendance_repository;
mod catalog_repository;
mod dashboard_reader;
mod goal_repository;
mod inquiry_repository;
mod member_repository;
mod payment_repository;
mod user_repository;

pub use attendance_repository::PostgresAttendanceRepository;
pub use catalog_repository::PostgresCatalogRepository;
pub use dashboard_reader::PostgresDashboardReader;
pub use goal_repository::PostgresGoalRepository;
pub use inquiry_repository::PostgresInquiryRepository;
pub use member_repository::PostgresMemberRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::DomainError;

const USERNAME_UNIQUE: &str = "users_username_key";

/// Runs the embedded migrations against `pool`.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(context, e)
}

/// Name of the constraint a statement violated, if any.
fn violated_constraint(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Maps a failed account insert, turning a taken username into a field error.
fn account_error(e: sqlx::Error) -> DomainError {
    if violated_constraint(&e).as_deref() == Some(USERNAME_UNIQUE) {
        return DomainError::validation("username", "That username is already taken");
    }
    DomainError::database("Failed to insert user", e)
}

/// Maps a failed write that referenced a missing row, e.g.
/// `members_trainer_id_fkey` becomes a field error on `trainer_id`.
fn reference_error(table: &str, context: &'static str, e: sqlx::Error) -> DomainError {
    if is_foreign_key_violation(&e) {
        if let Some(constraint) = violated_constraint(&e) {
            let field = constraint
                .strip_prefix(table)
                .and_then(|rest| rest.strip_prefix('_'))
                .and_then(|rest| rest.strip_suffix("_fkey"))
                .unwrap_or("id")
                .to_string();
            return DomainError::validation(field, "Selected record does not exist.");
        }
    }
    DomainError::database(context, e)
}
