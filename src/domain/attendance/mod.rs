//! Attendance check-ins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttendanceId, MemberId, Timestamp};

/// One visit by a member. Open until a check-out time is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub member_id: MemberId,
    pub check_in_time: Timestamp,
    pub check_out_time: Option<Timestamp>,
}

/// Result of asking to close a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOut {
    /// The visit was open and is now closed at the given time.
    Closed(Timestamp),
    /// The visit had already been closed; nothing changed.
    AlreadyClosed,
}

impl Attendance {
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Closes the visit at `now` if it is still open.
    pub fn check_out(&mut self, now: Timestamp) -> CheckOut {
        match self.check_out_time {
            Some(_) => CheckOut::AlreadyClosed,
            None => {
                self.check_out_time = Some(now);
                CheckOut::Closed(now)
            }
        }
    }
}

/// A check-in about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub member_id: MemberId,
    pub check_in_time: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit() -> Attendance {
        Attendance {
            id: AttendanceId::new(1),
            member_id: MemberId::new(1),
            check_in_time: Timestamp::now(),
            check_out_time: None,
        }
    }

    #[test]
    fn check_out_closes_open_visit() {
        let mut v = visit();
        let at = v.check_in_time.plus_minutes(60);
        assert_eq!(v.check_out(at), CheckOut::Closed(at));
        assert_eq!(v.check_out_time, Some(at));
        assert!(!v.is_open());
    }

    #[test]
    fn second_check_out_keeps_first_time() {
        let mut v = visit();
        let first = v.check_in_time.plus_minutes(30);
        v.check_out(first);

        assert_eq!(v.check_out(first.plus_minutes(30)), CheckOut::AlreadyClosed);
        assert_eq!(v.check_out_time, Some(first));
    }
}
