//! Attendance check-in, check-out and listing.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::attendance::{Attendance, CheckOut, NewAttendance};
use crate::domain::foundation::{
    Actor, AttendanceId, DomainError, ErrorCode, MemberId, Role, Timestamp,
};
use crate::ports::{AttendanceRepository, MemberRepository};

use super::Notice;

#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub member_id: MemberId,
    pub check_in_time: Timestamp,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CheckInResult {
    pub attendance: Attendance,
    /// A warning for an inactive membership comes first, then the success notice.
    pub notices: Vec<Notice>,
}

/// Records a visit. Members without an active membership are still let in,
/// with a warning.
pub struct CheckInHandler {
    attendance: Arc<dyn AttendanceRepository>,
    members: Arc<dyn MemberRepository>,
}

impl CheckInHandler {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            attendance,
            members,
        }
    }

    pub async fn handle(&self, cmd: CheckInCommand) -> Result<CheckInResult, DomainError> {
        let member = self
            .members
            .find_by_id(cmd.member_id)
            .await?
            .ok_or_else(|| DomainError::validation("member_id", "Selected member does not exist."))?;

        let mut notices = Vec::new();
        if !member.is_membership_active(cmd.today) {
            tracing::warn!(member_id = %member.id, "Check-in without an active membership");
            notices.push(Notice::warning(format!(
                "Member {} does not have an active membership.",
                member.name
            )));
        }

        let attendance = self
            .attendance
            .insert(NewAttendance {
                member_id: member.id,
                check_in_time: cmd.check_in_time,
            })
            .await?;

        tracing::info!(attendance_id = %attendance.id, member_id = %member.id, "Member checked in");
        notices.push(Notice::success(format!(
            "Member {} checked in successfully!",
            member.name
        )));

        Ok(CheckInResult {
            attendance,
            notices,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CheckOutCommand {
    pub attendance_id: AttendanceId,
    pub now: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CheckOutResult {
    pub attendance: Attendance,
    pub notice: Notice,
}

/// Closes an open visit. Closing one twice changes nothing.
pub struct CheckOutHandler {
    attendance: Arc<dyn AttendanceRepository>,
    members: Arc<dyn MemberRepository>,
}

impl CheckOutHandler {
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            attendance,
            members,
        }
    }

    pub async fn handle(&self, cmd: CheckOutCommand) -> Result<CheckOutResult, DomainError> {
        let mut attendance = self
            .attendance
            .find_by_id(cmd.attendance_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    ErrorCode::AttendanceNotFound,
                    "Attendance record",
                    cmd.attendance_id,
                )
            })?;

        let notice = match attendance.check_out(cmd.now) {
            CheckOut::AlreadyClosed => Notice::info("Member already checked out."),
            CheckOut::Closed(_) => {
                self.attendance.update(&attendance).await?;
                let name = self
                    .members
                    .find_by_id(attendance.member_id)
                    .await?
                    .map(|m| m.name)
                    .unwrap_or_else(|| attendance.member_id.to_string());
                tracing::info!(attendance_id = %attendance.id, "Member checked out");
                Notice::success(format!("Member {} checked out successfully!", name))
            }
        };

        Ok(CheckOutResult { attendance, notice })
    }
}

/// Lists visits, latest check-in first: all of them for administrators, the
/// linked member's for subscription users.
pub struct ListAttendanceHandler {
    attendance: Arc<dyn AttendanceRepository>,
}

impl ListAttendanceHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendance }
    }

    pub async fn handle(&self, actor: &Actor) -> Result<Vec<Attendance>, DomainError> {
        match (actor.role, actor.member_id) {
            (Role::Admin, _) => self.attendance.list().await,
            (Role::SubscriptionMember, Some(member_id)) => {
                self.attendance.list_for_member(member_id).await
            }
            (Role::SubscriptionMember, None) => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::NoticeLevel;
    use crate::domain::foundation::UserId;
    use crate::domain::membership::{Member, MemberDetails, MembershipWindow, NewMember};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn member(store: &InMemoryStore, end: Option<NaiveDate>) -> Member {
        MemberRepository::insert(
            store,
            NewMember::joining(
                MemberDetails {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
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

    fn check_in(store: &InMemoryStore) -> CheckInHandler {
        let shared = Arc::new(store.clone());
        CheckInHandler::new(shared.clone(), shared)
    }

    fn cmd(member_id: MemberId) -> CheckInCommand {
        CheckInCommand {
            member_id,
            check_in_time: Timestamp::now(),
            today: d(2024, 1, 15),
        }
    }

    #[tokio::test]
    async fn active_member_checks_in_without_warning() {
        let store = InMemoryStore::new();
        let m = member(&store, Some(d(2024, 1, 31))).await;

        let result = check_in(&store).handle(cmd(m.id)).await.unwrap();

        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].level, NoticeLevel::Success);
        assert!(result.attendance.is_open());
    }

    #[tokio::test]
    async fn lapsed_member_is_checked_in_with_warning() {
        let store = InMemoryStore::new();
        let m = member(&store, Some(d(2024, 1, 10))).await;

        let result = check_in(&store).handle(cmd(m.id)).await.unwrap();

        assert_eq!(result.notices[0].level, NoticeLevel::Warning);
        assert_eq!(
            result.notices[0].message,
            "Member Ada does not have an active membership."
        );
        assert_eq!(AttendanceRepository::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_member_cannot_check_in() {
        let store = InMemoryStore::new();
        let err = check_in(&store).handle(cmd(MemberId::new(3))).await.unwrap_err();
        assert!(err.details.contains_key("member_id"));
    }

    #[tokio::test]
    async fn second_check_out_is_informational() {
        let store = InMemoryStore::new();
        let m = member(&store, Some(d(2024, 1, 31))).await;
        let visit = check_in(&store).handle(cmd(m.id)).await.unwrap().attendance;
        let shared = Arc::new(store.clone());
        let handler = CheckOutHandler::new(shared.clone(), shared);

        let first = handler
            .handle(CheckOutCommand {
                attendance_id: visit.id,
                now: Timestamp::now(),
            })
            .await
            .unwrap();
        let closed_at = first.attendance.check_out_time;
        assert_eq!(first.notice.level, NoticeLevel::Success);

        let second = handler
            .handle(CheckOutCommand {
                attendance_id: visit.id,
                now: Timestamp::now().plus_minutes(5),
            })
            .await
            .unwrap();
        assert_eq!(second.notice, Notice::info("Member already checked out."));
        assert_eq!(second.attendance.check_out_time, closed_at);
    }

    #[tokio::test]
    async fn check_out_of_missing_record_is_not_found() {
        let shared = Arc::new(InMemoryStore::new());
        let err = CheckOutHandler::new(shared.clone(), shared)
            .handle(CheckOutCommand {
                attendance_id: AttendanceId::new(9),
                now: Timestamp::now(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AttendanceNotFound);
    }

    #[tokio::test]
    async fn subscriber_lists_own_visits() {
        let store = InMemoryStore::new();
        let mine = member(&store, None).await;
        let other = member(&store, None).await;
        check_in(&store).handle(cmd(mine.id)).await.unwrap();
        check_in(&store).handle(cmd(other.id)).await.unwrap();

        let visits = ListAttendanceHandler::new(Arc::new(store.clone()))
            .handle(&Actor::new(
                UserId::new(70),
                "sam",
                Role::SubscriptionMember,
                Some(mine.id),
            ))
            .await
            .unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].member_id, mine.id);
    }
}
