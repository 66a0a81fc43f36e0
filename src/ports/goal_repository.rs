//! Goal repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GoalId, UserId};
use crate::domain::goal::{Goal, NewGoal};

#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn insert(&self, goal: NewGoal) -> Result<Goal, DomainError>;

    /// # Errors
    ///
    /// - `GoalNotFound` if the goal doesn't exist
    async fn update(&self, goal: &Goal) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `GoalNotFound` if the goal doesn't exist
    async fn delete(&self, id: GoalId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: GoalId) -> Result<Option<Goal>, DomainError>;

    /// Goals ordered by end date, latest first; only `owner`'s when given.
    async fn list(&self, owner: Option<UserId>) -> Result<Vec<Goal>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn _accepts_dyn(_repo: &dyn GoalRepository) {}
}
