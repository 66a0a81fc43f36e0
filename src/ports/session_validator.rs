//! Session token ports.
//!
//! `SessionIssuer` mints a bearer token for an actor after a successful login;
//! `SessionValidator` turns a presented token back into that actor. HTTP
//! middleware only ever sees the validator.
//!
//! # Contract
//!
//! Validators must:
//! - Verify the token signature
//! - Reject expired tokens with `AuthError::TokenExpired`
//! - Reject tokens carrying an unknown role with `AuthError::UnknownRole`
//! - Return `AuthError::InvalidToken` for anything else malformed

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{Actor, AuthError};

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionToken {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

/// Issues session tokens for authenticated actors.
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, actor: &Actor) -> Result<SessionToken, AuthError>;
}

/// Validates session tokens and extracts the actor.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<Actor, AuthError>;
}
