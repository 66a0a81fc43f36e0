//! Member repository port.
//!
//! Members are the hub of the schema: plans, trainers and workout plans are
//! referenced from a member, and payments, attendance and user accounts point
//! back at one. Implementations own the referential rules that follow.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, MemberId, PlanId, TrainerId, WorkoutPlanId};
use crate::domain::membership::{Member, NewMember};
use crate::domain::user::{NewUser, User};

/// Repository port for member records.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member and return it with its assigned id.
    async fn insert(&self, member: NewMember) -> Result<Member, DomainError>;

    /// Insert a member and a login account linked to it, atomically.
    ///
    /// The account's `member_id` is set to the new member's id. If either
    /// insert fails nothing is stored.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on the `username` field if the username is taken
    /// - `DatabaseError` on persistence failure
    async fn insert_with_account(
        &self,
        member: NewMember,
        account: NewUser,
    ) -> Result<(Member, User), DomainError>;

    /// Overwrite an existing member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Delete a member together with its payments and attendance records.
    /// Accounts linked to the member are kept but unlinked.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    async fn delete(&self, id: MemberId) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, DomainError>;

    /// All members ordered by name, then id.
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    async fn count_by_plan(&self, plan_id: PlanId) -> Result<i64, DomainError>;

    async fn count_by_trainer(&self, trainer_id: TrainerId) -> Result<i64, DomainError>;

    async fn count_by_workout_plan(&self, workout_plan_id: WorkoutPlanId) -> Result<i64, DomainError>;

    /// Members whose end date falls in `from..=to`, soonest first.
    async fn find_expiring_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Member>, DomainError>;

    /// Members whose end date is strictly before `date`, most recently lapsed first.
    async fn find_lapsed_before(&self, date: NaiveDate) -> Result<Vec<Member>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn _accepts_dyn(_repo: &dyn MemberRepository) {}
}
