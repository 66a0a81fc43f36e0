//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MemberRepository` - Members, including the atomic member + account insert
//! - `PlanRepository`, `TrainerRepository`, `WorkoutPlanRepository` - Catalogs
//! - `PaymentRepository` - Payments, recorded atomically with the renewed window
//! - `AttendanceRepository`, `GoalRepository`, `InquiryRepository`, `UserRepository`
//! - `DashboardReader` - Aggregates for the administrator dashboard
//!
//! ## Credential Ports
//!
//! - `PasswordHasher` - Salted password hashing
//! - `SessionIssuer` / `SessionValidator` - Bearer session tokens

mod attendance_repository;
mod catalog_repository;
mod dashboard_reader;
mod goal_repository;
mod inquiry_repository;
mod member_repository;
mod password_hasher;
mod payment_repository;
mod session_validator;
mod user_repository;

pub use attendance_repository::AttendanceRepository;
pub use catalog_repository::{PlanRepository, TrainerRepository, WorkoutPlanRepository};
pub use dashboard_reader::DashboardReader;
pub use goal_repository::GoalRepository;
pub use inquiry_repository::InquiryRepository;
pub use member_repository::MemberRepository;
pub use password_hasher::PasswordHasher;
pub use payment_repository::PaymentRepository;
pub use session_validator::{SessionIssuer, SessionToken, SessionValidator};
pub use user_repository::UserRepository;
