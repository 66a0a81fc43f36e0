//! HTTP adapter for member records.
//!
//! - `GET /members` - List members
//! - `POST /members/add` - Add a member (admin)
//! - `GET /members/:id` - Member with resolved assignments
//! - `POST /members/edit/:id` - Edit a member (admin)
//! - `GET /members/export/:id` - Plain-text export (admin)
//! - `POST /members/delete/:id` - Delete a member (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::MemberForm;
pub use routes::member_routes;
