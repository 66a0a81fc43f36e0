use async_trait::async_trait;

use crate::domain::attendance::{Attendance, NewAttendance};
use crate::domain::foundation::{
    AttendanceId, DomainError, ErrorCode, GoalId, InquiryId, MemberId, PaymentId, Role, UserId,
};
use crate::domain::goal::{Goal, NewGoal};
use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::domain::membership::{NewPayment, Payment, Renewal};
use crate::domain::user::{NewUser, User};
use crate::ports::{
    AttendanceRepository, GoalRepository, InquiryRepository, PaymentRepository, UserRepository,
};

use super::{InMemoryStore, Tables};

fn require_member(t: &Tables, id: MemberId) -> Result<(), DomainError> {
    if t.members.contains_key(&id) {
        Ok(())
    } else {
        Err(DomainError::validation("member_id", "Selected member does not exist."))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn record(
        &self,
        payment: NewPayment,
        renewal: Option<Renewal>,
    ) -> Result<Payment, DomainError> {
        let mut t = self.tables.write().await;
        require_member(&t, payment.member_id)?;

        let payment = Payment::from_new(PaymentId::new(t.next_id()), payment);
        if let Some(renewal) = renewal {
            let member = t.members.get_mut(&payment.member_id).ok_or_else(|| {
                DomainError::not_found(ErrorCode::MemberNotFound, "Member", payment.member_id)
            })?;
            member.window = renewal.apply(&member.window);
        }
        t.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn list(&self) -> Result<Vec<Payment>, DomainError> {
        let mut payments: Vec<_> = self.tables.read().await.payments.values().cloned().collect();
        payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date).then(b.id.cmp(&a.id)));
        Ok(payments)
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Payment>, DomainError> {
        let mut payments = PaymentRepository::list(self).await?;
        payments.retain(|p| p.member_id == member_id);
        Ok(payments)
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn insert(&self, check_in: NewAttendance) -> Result<Attendance, DomainError> {
        let mut t = self.tables.write().await;
        require_member(&t, check_in.member_id)?;
        let record = Attendance {
            id: AttendanceId::new(t.next_id()),
            member_id: check_in.member_id,
            check_in_time: check_in.check_in_time,
            check_out_time: None,
        };
        t.attendance.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        let slot = t.attendance.get_mut(&attendance.id).ok_or_else(|| {
            DomainError::not_found(ErrorCode::AttendanceNotFound, "Attendance record", attendance.id)
        })?;
        *slot = attendance.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: AttendanceId) -> Result<Option<Attendance>, DomainError> {
        Ok(self.tables.read().await.attendance.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Attendance>, DomainError> {
        let mut records: Vec<_> = self.tables.read().await.attendance.values().cloned().collect();
        records.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Attendance>, DomainError> {
        let mut records = AttendanceRepository::list(self).await?;
        records.retain(|a| a.member_id == member_id);
        Ok(records)
    }
}

#[async_trait]
impl GoalRepository for InMemoryStore {
    async fn insert(&self, goal: NewGoal) -> Result<Goal, DomainError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&goal.user_id) {
            return Err(DomainError::validation("user_id", "Selected user does not exist."));
        }
        let goal = Goal::from_new(GoalId::new(t.next_id()), goal);
        t.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    async fn update(&self, goal: &Goal) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&goal.user_id) {
            return Err(DomainError::validation("user_id", "Selected user does not exist."));
        }
        let slot = t
            .goals
            .get_mut(&goal.id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::GoalNotFound, "Goal", goal.id))?;
        *slot = goal.clone();
        Ok(())
    }

    async fn delete(&self, id: GoalId) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        t.goals
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(ErrorCode::GoalNotFound, "Goal", id))
    }

    async fn find_by_id(&self, id: GoalId) -> Result<Option<Goal>, DomainError> {
        Ok(self.tables.read().await.goals.get(&id).cloned())
    }

    async fn list(&self, owner: Option<UserId>) -> Result<Vec<Goal>, DomainError> {
        let t = self.tables.read().await;
        let mut goals: Vec<Goal> = t
            .goals
            .values()
            .filter(|g| owner.map_or(true, |id| g.user_id == id))
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.end_date.cmp(&a.end_date).then(b.id.cmp(&a.id)));
        Ok(goals)
    }
}

#[async_trait]
impl InquiryRepository for InMemoryStore {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, DomainError> {
        let mut t = self.tables.write().await;
        let inquiry = Inquiry::from_new(InquiryId::new(t.next_id()), inquiry);
        t.inquiries.insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn list(&self) -> Result<Vec<Inquiry>, DomainError> {
        let mut inquiries: Vec<_> = self.tables.read().await.inquiries.values().cloned().collect();
        inquiries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));
        Ok(inquiries)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut t = self.tables.write().await;
        t.ensure_username_free(&user.username)?;
        if let Some(member_id) = user.member_id {
            require_member(&t, member_id)?;
        }
        let user = User::from_new(UserId::new(t.next_id()), user);
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<_> = self.tables.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn exists_with_role(&self, role: Role) -> Result<bool, DomainError> {
        Ok(self.tables.read().await.users.values().any(|u| u.role == role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Money, Timestamp};
    use crate::domain::goal::{GoalCategory, GoalDetails};
    use crate::domain::membership::{Member, MemberDetails, MembershipWindow, NewMember};
    use crate::domain::user::PasswordHash;
    use crate::ports::MemberRepository;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn member(store: &InMemoryStore) -> Member {
        MemberRepository::insert(
            store,
            NewMember::joining(
                MemberDetails {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                    phone: "555".to_string(),
                    window: MembershipWindow::EMPTY,
                    plan_id: None,
                    trainer_id: None,
                    workout_plan_id: None,
                },
                d(2024, 1, 1),
            ),
        )
        .await
        .unwrap()
    }

    fn payment(member_id: MemberId, on: NaiveDate) -> NewPayment {
        NewPayment {
            member_id,
            amount: Money::from_cents(1000).unwrap(),
            payment_date: on,
            plan_id: None,
        }
    }

    fn thirty_days(on: NaiveDate) -> Option<Renewal> {
        Some(Renewal {
            duration_days: 30,
            payment_date: on,
        })
    }

    #[tokio::test]
    async fn payment_and_renewal_are_stored_together() {
        let store = InMemoryStore::new();
        let m = member(&store).await;

        store.record(payment(m.id, d(2024, 1, 1)), thirty_days(d(2024, 1, 1))).await.unwrap();

        let stored = MemberRepository::find_by_id(&store, m.id).await.unwrap().unwrap();
        assert_eq!(stored.window, MembershipWindow::starting(d(2024, 1, 1), 30));
    }

    #[tokio::test]
    async fn renewals_build_on_the_stored_window() {
        let store = InMemoryStore::new();
        let m = member(&store).await;

        store.record(payment(m.id, d(2024, 1, 1)), thirty_days(d(2024, 1, 1))).await.unwrap();
        store.record(payment(m.id, d(2024, 1, 15)), thirty_days(d(2024, 1, 15))).await.unwrap();

        let stored = MemberRepository::find_by_id(&store, m.id).await.unwrap().unwrap();
        assert_eq!(stored.window.start, Some(d(2024, 1, 1)));
        assert_eq!(stored.window.end, Some(d(2024, 3, 1)));
    }

    #[tokio::test]
    async fn renewal_leaves_other_member_fields_alone() {
        let store = InMemoryStore::new();
        let m = member(&store).await;
        let mut edited = m.clone();
        edited.name = "Ada Lovelace".to_string();
        MemberRepository::update(&store, &edited).await.unwrap();

        store.record(payment(m.id, d(2024, 1, 1)), thirty_days(d(2024, 1, 1))).await.unwrap();

        let stored = MemberRepository::find_by_id(&store, m.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(stored.window.end, Some(d(2024, 1, 31)));
    }

    #[tokio::test]
    async fn payment_for_missing_member_is_rejected() {
        let store = InMemoryStore::new();
        let err = store
            .record(payment(MemberId::new(42), d(2024, 1, 1)), None)
            .await
            .unwrap_err();
        assert!(err.details.contains_key("member_id"));
        assert!(PaymentRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn payments_list_newest_first_and_filter_by_member() {
        let store = InMemoryStore::new();
        let a = member(&store).await;
        let b = member(&store).await;
        store.record(payment(a.id, d(2024, 1, 1)), None).await.unwrap();
        store.record(payment(b.id, d(2024, 3, 1)), None).await.unwrap();
        store.record(payment(a.id, d(2024, 2, 1)), None).await.unwrap();

        let dates: Vec<_> = PaymentRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.payment_date)
            .collect();
        assert_eq!(dates, [d(2024, 3, 1), d(2024, 2, 1), d(2024, 1, 1)]);

        let mine = PaymentRepository::list_for_member(&store, a.id).await;
        assert_eq!(mine.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn goals_filter_by_owner_latest_end_first() {
        let store = InMemoryStore::new();
        let owner = UserRepository::insert(
            &store,
            NewUser {
                username: "sam".to_string(),
                email: "sam@example.com".to_string(),
                password_hash: PasswordHash::new("h"),
                role: Role::SubscriptionMember,
                member_id: None,
            },
        )
        .await
        .unwrap();
        for end in [d(2024, 1, 1), d(2024, 6, 1)] {
            GoalRepository::insert(
                &store,
                NewGoal::self_set(
                    owner.id,
                    GoalDetails {
                        category: GoalCategory::Monthly,
                        description: "Lift".to_string(),
                        target_value: 100.0,
                        unit: "kg".to_string(),
                        end_date: end,
                    },
                    Timestamp::now(),
                ),
            )
            .await
            .unwrap();
        }

        let goals = GoalRepository::list(&store, Some(owner.id)).await.unwrap();
        assert_eq!(goals[0].end_date, d(2024, 6, 1));
        assert!(GoalRepository::list(&store, Some(UserId::new(999)))
            .await
            .unwrap()
            .is_empty());
    }
}
