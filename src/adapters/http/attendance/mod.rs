//! HTTP adapter for attendance.
//!
//! - `GET /attendance` - Visits, latest first
//! - `POST /attendance/checkin` - Check a member in (admin)
//! - `POST /attendance/checkout/:id` - Close a visit (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::CheckInForm;
pub use routes::attendance_routes;
