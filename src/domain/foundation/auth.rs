//! Authentication types for the domain layer.
//!
//! An [`Actor`] is the authenticated user performing a request. It is built by
//! the `SessionValidator` adapter from a verified session token and handed to
//! every handler explicitly; nothing in the domain reads an ambient current user.

use super::{MemberId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Gym staff with full access.
    #[serde(rename = "admin")]
    Admin,
    /// A paying member with read access to their own records.
    #[serde(rename = "subscription")]
    SubscriptionMember,
}

impl Role {
    /// Returns the stored representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SubscriptionMember => "subscription",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "subscription" => Ok(Role::SubscriptionMember),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated user performing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    /// The member record this account belongs to, if any.
    pub member_id: Option<MemberId>,
}

impl Actor {
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        role: Role,
        member_id: Option<MemberId>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            member_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns true when this actor may read the given member record.
    pub fn can_view_member(&self, member_id: MemberId) -> bool {
        match self.role {
            Role::Admin => true,
            Role::SubscriptionMember => self.member_id == Some(member_id),
        }
    }
}

/// Authentication errors that can occur during login or token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Username or password did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token carries a role this application does not know.
    #[error("{0}")]
    UnknownRole(#[from] UnknownRole),

    /// Token signing or hashing failed for reasons outside the caller's control.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UnknownRole(_)
        )
    }
}
