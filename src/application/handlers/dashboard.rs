//! Administrator dashboard query.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::domain::dashboard::{DashboardSummary, EXPIRY_WARNING_DAYS};
use crate::domain::foundation::DomainError;
use crate::ports::{DashboardReader, MemberRepository};

pub struct GetDashboardHandler {
    reader: Arc<dyn DashboardReader>,
    members: Arc<dyn MemberRepository>,
}

impl GetDashboardHandler {
    pub fn new(reader: Arc<dyn DashboardReader>, members: Arc<dyn MemberRepository>) -> Self {
        Self { reader, members }
    }

    pub async fn handle(&self, today: NaiveDate) -> Result<DashboardSummary, DomainError> {
        let counts = self.reader.counts(today).await?;
        let horizon = today
            .checked_add_days(Days::new(u64::from(EXPIRY_WARNING_DAYS)))
            .unwrap_or(NaiveDate::MAX);
        let expiring_members = self.members.find_expiring_between(today, horizon).await?;
        let members_needing_renewal = self.members.find_lapsed_before(today).await?;

        Ok(DashboardSummary {
            counts,
            expiring_members,
            members_needing_renewal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::attendance::NewAttendance;
    use crate::domain::foundation::{Money, Timestamp};
    use crate::domain::membership::{Member, MemberDetails, MembershipWindow, NewMember, NewPayment};
    use crate::ports::{AttendanceRepository, PaymentRepository};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn member(store: &InMemoryStore, name: &str, end: Option<NaiveDate>) -> Member {
        MemberRepository::insert(
            store,
            NewMember::joining(
                MemberDetails {
                    name: name.to_string(),
                    email: "m@example.com".to_string(),
                    phone: "555".to_string(),
                    window: MembershipWindow::new(end.map(|_| d(2024, 1, 1)), end),
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

    #[tokio::test]
    async fn summary_splits_expiring_from_lapsed() {
        let store = InMemoryStore::new();
        let today = Timestamp::now().date();
        let soon = today.checked_add_days(Days::new(3)).unwrap();
        let later = today.checked_add_days(Days::new(30)).unwrap();
        let past = today.checked_sub_days(Days::new(1)).unwrap();

        let expiring = member(&store, "Soon", Some(soon)).await;
        member(&store, "Later", Some(later)).await;
        let lapsed = member(&store, "Lapsed", Some(past)).await;
        member(&store, "Never", None).await;

        PaymentRepository::record(
            &store,
            NewPayment {
                member_id: expiring.id,
                amount: Money::from_cents(4550).unwrap(),
                payment_date: today,
                plan_id: None,
            },
            None,
        )
        .await
        .unwrap();
        AttendanceRepository::insert(
            &store,
            NewAttendance {
                member_id: expiring.id,
                check_in_time: Timestamp::now(),
            },
        )
        .await
        .unwrap();

        let shared = Arc::new(store.clone());
        let summary = GetDashboardHandler::new(shared.clone(), shared)
            .handle(today)
            .await
            .unwrap();

        assert_eq!(summary.counts.total_members, 4);
        assert_eq!(summary.counts.active_members, 2);
        assert_eq!(summary.counts.todays_check_ins, 1);
        assert_eq!(summary.counts.total_revenue, Money::from_cents(4550).unwrap());
        assert_eq!(summary.expiring_members, vec![expiring]);
        assert_eq!(summary.members_needing_renewal, vec![lapsed]);
    }
}
