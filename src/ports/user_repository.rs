//! User account repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert an account.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on the `username` field if the username is taken
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// All accounts ordered by username.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    async fn exists_with_role(&self, role: Role) -> Result<bool, DomainError>;
}
