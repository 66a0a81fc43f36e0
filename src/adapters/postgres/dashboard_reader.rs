//! PostgreSQL implementation of DashboardReader.
//!
//! All counts come from a single round trip.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::dashboard::DashboardCounts;
use crate::domain::foundation::{DomainError, ErrorCode, Money};
use crate::ports::DashboardReader;

use super::db_error;

#[derive(Clone)]
pub struct PostgresDashboardReader {
    pool: PgPool,
}

impl PostgresDashboardReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CountsRow {
    total_members: i64,
    active_members: i64,
    todays_check_ins: i64,
    revenue_cents: i64,
    inquiry_count: i64,
}

impl TryFrom<CountsRow> for DashboardCounts {
    type Error = DomainError;

    fn try_from(row: CountsRow) -> Result<Self, Self::Error> {
        let total_revenue = Money::from_cents(row.revenue_cents).map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, "Negative revenue total")
        })?;
        Ok(DashboardCounts {
            total_members: row.total_members,
            active_members: row.active_members,
            todays_check_ins: row.todays_check_ins,
            total_revenue,
            inquiry_count: row.inquiry_count,
        })
    }
}

#[async_trait]
impl DashboardReader for PostgresDashboardReader {
    async fn counts(&self, today: NaiveDate) -> Result<DashboardCounts, DomainError> {
        let row: CountsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM members) AS total_members,
                (SELECT COUNT(*) FROM members WHERE membership_end_date >= $1) AS active_members,
                (SELECT COUNT(*) FROM attendance
                    WHERE (check_in_time AT TIME ZONE 'UTC')::DATE = $1) AS todays_check_ins,
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments) AS revenue_cents,
                (SELECT COUNT(*) FROM inquiries) AS inquiry_count
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to load dashboard counts"))?;

        row.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(revenue_cents: i64) -> CountsRow {
        CountsRow {
            total_members: 4,
            active_members: 3,
            todays_check_ins: 2,
            revenue_cents,
            inquiry_count: 1,
        }
    }

    #[test]
    fn row_converts_to_counts() {
        let counts = DashboardCounts::try_from(row(12_345)).unwrap();
        assert_eq!(counts.total_members, 4);
        assert_eq!(counts.total_revenue, Money::from_cents(12_345).unwrap());
        assert_eq!(counts.inquiry_count, 1);
    }

    #[test]
    fn negative_revenue_is_a_database_error() {
        let err = DashboardCounts::try_from(row(-1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
