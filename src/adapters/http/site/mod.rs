//! Public pages, inquiries and the administrator dashboard.
//!
//! - `GET /`, `GET /home` - Welcome payload
//! - `POST /inquiry` - Public contact form
//! - `GET /admin/inquiries` - Submitted inquiries (admin)
//! - `GET /dashboard` - Counts and renewal lists (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{InquiryForm, WelcomeResponse};
pub use routes::site_routes;
