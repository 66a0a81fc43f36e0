//! Attendance repository port.

use async_trait::async_trait;

use crate::domain::attendance::{Attendance, NewAttendance};
use crate::domain::foundation::{AttendanceId, DomainError, MemberId};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn insert(&self, check_in: NewAttendance) -> Result<Attendance, DomainError>;

    /// Persist a changed check-out time.
    ///
    /// # Errors
    ///
    /// - `AttendanceNotFound` if the record doesn't exist
    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: AttendanceId) -> Result<Option<Attendance>, DomainError>;

    /// All visits, latest check-in first.
    async fn list(&self) -> Result<Vec<Attendance>, DomainError>;

    /// One member's visits, latest check-in first.
    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Attendance>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn _accepts_dyn(_repo: &dyn AttendanceRepository) {}
}
