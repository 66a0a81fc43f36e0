use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::dashboard::DashboardCounts;
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Money, PlanId, TrainerId, UserId, WorkoutPlanId,
};
use crate::domain::membership::{Member, NewMember};
use crate::domain::user::{NewUser, User};
use crate::ports::{DashboardReader, MemberRepository};

use super::InMemoryStore;

fn member_not_found(id: MemberId) -> DomainError {
    DomainError::not_found(ErrorCode::MemberNotFound, "Member", id)
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn insert(&self, member: NewMember) -> Result<Member, DomainError> {
        let mut t = self.tables.write().await;
        let id = MemberId::new(t.next_id());
        let member = Member::from_new(id, member);
        t.members.insert(id, member.clone());
        Ok(member)
    }

    async fn insert_with_account(
        &self,
        member: NewMember,
        account: NewUser,
    ) -> Result<(Member, User), DomainError> {
        let mut t = self.tables.write().await;
        t.ensure_username_free(&account.username)?;

        let member_id = MemberId::new(t.next_id());
        let member = Member::from_new(member_id, member);
        let user_id = UserId::new(t.next_id());
        let user = User::from_new(
            user_id,
            NewUser {
                member_id: Some(member_id),
                ..account
            },
        );

        t.members.insert(member_id, member.clone());
        t.users.insert(user_id, user.clone());
        Ok((member, user))
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        let slot = t
            .members
            .get_mut(&member.id)
            .ok_or_else(|| member_not_found(member.id))?;
        *slot = member.clone();
        Ok(())
    }

    async fn delete(&self, id: MemberId) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        t.members.remove(&id).ok_or_else(|| member_not_found(id))?;
        t.payments.retain(|_, p| p.member_id != id);
        t.attendance.retain(|_, a| a.member_id != id);
        for user in t.users.values_mut() {
            if user.member_id == Some(id) {
                user.member_id = None;
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let mut members: Vec<Member> = self.tables.read().await.members.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn count_by_plan(&self, plan_id: PlanId) -> Result<i64, DomainError> {
        let t = self.tables.read().await;
        Ok(t.members.values().filter(|m| m.plan_id == Some(plan_id)).count() as i64)
    }

    async fn count_by_trainer(&self, trainer_id: TrainerId) -> Result<i64, DomainError> {
        let t = self.tables.read().await;
        Ok(t.members.values().filter(|m| m.trainer_id == Some(trainer_id)).count() as i64)
    }

    async fn count_by_workout_plan(&self, workout_plan_id: WorkoutPlanId) -> Result<i64, DomainError> {
        let t = self.tables.read().await;
        Ok(t.members
            .values()
            .filter(|m| m.workout_plan_id == Some(workout_plan_id))
            .count() as i64)
    }

    async fn find_expiring_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Member>, DomainError> {
        let t = self.tables.read().await;
        let mut members: Vec<Member> = t
            .members
            .values()
            .filter(|m| m.window.end.is_some_and(|end| end >= from && end <= to))
            .cloned()
            .collect();
        members.sort_by_key(|m| (m.window.end, m.id));
        Ok(members)
    }

    async fn find_lapsed_before(&self, date: NaiveDate) -> Result<Vec<Member>, DomainError> {
        let t = self.tables.read().await;
        let mut members: Vec<Member> = t
            .members
            .values()
            .filter(|m| m.window.is_lapsed_on(date))
            .cloned()
            .collect();
        members.sort_by(|a, b| b.window.end.cmp(&a.window.end).then(a.id.cmp(&b.id)));
        Ok(members)
    }
}

#[async_trait]
impl DashboardReader for InMemoryStore {
    async fn counts(&self, today: NaiveDate) -> Result<DashboardCounts, DomainError> {
        let t = self.tables.read().await;
        Ok(DashboardCounts {
            total_members: t.members.len() as i64,
            active_members: t
                .members
                .values()
                .filter(|m| m.window.is_active_on(today))
                .count() as i64,
            todays_check_ins: t
                .attendance
                .values()
                .filter(|a| a.check_in_time.date() == today)
                .count() as i64,
            total_revenue: t.payments.values().map(|p| p.amount).sum::<Money>(),
            inquiry_count: t.inquiries.len() as i64,
        })
    }
}
