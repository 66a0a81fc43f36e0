//! In-memory store implementing every persistence port.
//!
//! All tables sit behind one lock, so the multi-record writes (member with
//! account, payment with renewal) are atomic here just as they are inside a
//! database transaction. Referential rules mirror the SQL schema: catalog
//! entries in use cannot be deleted, and deleting a member removes its
//! payments and attendance and unlinks its accounts.
//!
//! Useful for tests and local development.

mod catalog;
mod members;
mod records;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::attendance::Attendance;
use crate::domain::foundation::{
    AttendanceId, DomainError, GoalId, InquiryId, MemberId, PaymentId, PlanId, TrainerId,
    UserId, WorkoutPlanId,
};
use crate::domain::goal::Goal;
use crate::domain::inquiry::Inquiry;
use crate::domain::membership::{Member, MembershipPlan, Payment};
use crate::domain::training::{Trainer, WorkoutPlan};
use crate::domain::user::User;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    next_id: i64,
    pub(crate) members: BTreeMap<MemberId, Member>,
    pub(crate) plans: BTreeMap<PlanId, MembershipPlan>,
    pub(crate) trainers: BTreeMap<TrainerId, Trainer>,
    pub(crate) workout_plans: BTreeMap<WorkoutPlanId, WorkoutPlan>,
    pub(crate) payments: BTreeMap<PaymentId, Payment>,
    pub(crate) attendance: BTreeMap<AttendanceId, Attendance>,
    pub(crate) goals: BTreeMap<GoalId, Goal>,
    pub(crate) inquiries: BTreeMap<InquiryId, Inquiry>,
    pub(crate) users: BTreeMap<UserId, User>,
}

impl Tables {
    /// Ids are unique across tables, which keeps mix-ups visible in tests.
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn username_taken(&self, username: &str) -> bool {
        self.users.values().any(|u| u.username == username)
    }

    fn ensure_username_free(&self, username: &str) -> Result<(), DomainError> {
        if self.username_taken(username) {
            return Err(DomainError::validation(
                "username",
                "That username is already taken",
            ));
        }
        Ok(())
    }
}

/// Shared in-memory store. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;
    use crate::domain::user::{NewUser, PasswordHash};
    use crate::ports::UserRepository;

    fn user(name: &str, role: Role) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: PasswordHash::new("h"),
            role,
            member_id: None,
        }
    }

    #[tokio::test]
    async fn clones_share_tables() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.insert(user("root", Role::Admin)).await.unwrap();

        assert!(other.find_by_username("root").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_field_error() {
        let store = InMemoryStore::new();
        store.insert(user("root", Role::Admin)).await.unwrap();
        let err = store.insert(user("root", Role::Admin)).await.unwrap_err();

        assert!(err.details.contains_key("username"));
    }

    #[tokio::test]
    async fn users_list_by_username_and_roles_are_queryable() {
        let store = InMemoryStore::new();
        store.insert(user("zed", Role::SubscriptionMember)).await.unwrap();
        store.insert(user("amy", Role::SubscriptionMember)).await.unwrap();

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, ["amy", "zed"]);
        assert!(!store.exists_with_role(Role::Admin).await.unwrap());
        assert!(store.exists_with_role(Role::SubscriptionMember).await.unwrap());
    }
}
