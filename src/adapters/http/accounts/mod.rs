//! HTTP adapter for login sessions and account creation.
//!
//! - `POST /login` - Exchange credentials for a bearer token
//! - `POST /logout` - End the session
//! - `POST /admin/create_admin` - Create another administrator (admin)
//! - `POST /admin/create_member_and_user` - Member plus subscription login (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CreateAdminForm, CreateMemberAndUserForm, LoginForm, LoginResponse, UserInfo};
pub use routes::account_routes;
