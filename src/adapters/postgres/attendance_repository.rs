//! PostgreSQL implementation of AttendanceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::attendance::{Attendance, NewAttendance};
use crate::domain::foundation::{AttendanceId, DomainError, ErrorCode, MemberId, Timestamp};
use crate::ports::AttendanceRepository;

use super::{db_error, reference_error};

#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: i64,
    member_id: i64,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: AttendanceId::new(row.id),
            member_id: MemberId::new(row.member_id),
            check_in_time: Timestamp::from_datetime(row.check_in_time),
            check_out_time: row.check_out_time.map(Timestamp::from_datetime),
        }
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn insert(&self, check_in: NewAttendance) -> Result<Attendance, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendance (member_id, check_in_time)
            VALUES ($1, $2)
            RETURNING id, member_id, check_in_time, check_out_time
            "#,
        )
        .bind(check_in.member_id.value())
        .bind(check_in.check_in_time.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| reference_error("attendance", "Failed to record check-in", e))?;
        Ok(row.into())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE attendance SET check_in_time = $2, check_out_time = $3 WHERE id = $1",
        )
        .bind(attendance.id.value())
        .bind(attendance.check_in_time.as_datetime())
        .bind(attendance.check_out_time.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update attendance"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record",
                attendance.id,
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: AttendanceId) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            "SELECT id, member_id, check_in_time, check_out_time FROM attendance WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load attendance"))?;
        Ok(row.map(Attendance::from))
    }

    async fn list(&self) -> Result<Vec<Attendance>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_out_time
            FROM attendance
            ORDER BY check_in_time DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list attendance"))?;
        Ok(rows.into_iter().map(Attendance::from).collect())
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Attendance>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_out_time
            FROM attendance
            WHERE member_id = $1
            ORDER BY check_in_time DESC, id DESC
            "#,
        )
        .bind(member_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list attendance"))?;
        Ok(rows.into_iter().map(Attendance::from).collect())
    }
}
