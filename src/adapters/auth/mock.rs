//! Mock session validator for testing.
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_actor("admin-token", Actor::new(UserId::new(1), "root", Role::Admin, None));
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{Actor, AuthError, Role, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to actors. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, Actor>>,
    /// Optional error to return for all validations
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(self, token: impl Into<String>, actor: Actor) -> Self {
        self.tokens.write().unwrap().insert(token.into(), actor);
        self
    }

    /// Adds an administrator with the given id.
    pub fn with_admin(self, token: impl Into<String>, user_id: i64) -> Self {
        self.with_actor(token, Actor::new(UserId::new(user_id), "admin", Role::Admin, None))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Actor, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_actor() {
        let validator = MockSessionValidator::new().with_admin("t", 1);
        let actor = validator.validate("t").await.unwrap();
        assert_eq!(actor.role, Role::Admin);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_admin("t", 1)
            .with_error(AuthError::service_unavailable("down"));
        assert!(validator.validate("t").await.is_err());
    }
}
