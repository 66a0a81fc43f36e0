//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `memory` - In-memory store for tests and local development
//! - `auth` - PBKDF2 password hashing and JWT sessions
//! - `http` - axum routes, extractors and error mapping

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
