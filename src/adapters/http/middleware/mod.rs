//! HTTP middleware for axum.
//!
//! - `auth` - Bearer-token middleware and the role-checking extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAdmin, RequireAuth};
