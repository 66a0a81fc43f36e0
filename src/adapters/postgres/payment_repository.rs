//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Money, PaymentId, PlanId};
use crate::domain::membership::{MembershipWindow, NewPayment, Payment, Renewal};
use crate::ports::PaymentRepository;

use super::{db_error, reference_error};

#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    member_id: i64,
    amount_cents: i64,
    payment_date: NaiveDate,
    plan_id: Option<i64>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let amount = Money::from_cents(row.amount_cents).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid amount for payment {}", row.id),
            )
        })?;
        Ok(Payment {
            id: PaymentId::new(row.id),
            member_id: MemberId::new(row.member_id),
            amount,
            payment_date: row.payment_date,
            plan_id: row.plan_id.map(PlanId::new),
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn record(
        &self,
        payment: NewPayment,
        renewal: Option<Renewal>,
    ) -> Result<Payment, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if let Some(renewal) = renewal {
            let current: Option<(Option<NaiveDate>, Option<NaiveDate>)> = sqlx::query_as(
                r#"
                SELECT membership_start_date, membership_end_date
                FROM members
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(payment.member_id.value())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock member"))?;

            let (start, end) = current.ok_or_else(|| {
                DomainError::not_found(ErrorCode::MemberNotFound, "Member", payment.member_id)
            })?;
            let window = renewal.apply(&MembershipWindow::new(start, end));

            sqlx::query(
                r#"
                UPDATE members
                SET membership_start_date = $2, membership_end_date = $3
                WHERE id = $1
                "#,
            )
            .bind(payment.member_id.value())
            .bind(window.start)
            .bind(window.end)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to renew membership"))?;
        }

        let row: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (member_id, amount_cents, payment_date, plan_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, member_id, amount_cents, payment_date, plan_id
            "#,
        )
        .bind(payment.member_id.value())
        .bind(payment.amount.cents())
        .bind(payment.payment_date)
        .bind(payment.plan_id.map(i64::from))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| reference_error("payments", "Failed to insert payment", e))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, amount_cents, payment_date, plan_id
            FROM payments
            ORDER BY payment_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list payments"))?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, amount_cents, payment_date, plan_id
            FROM payments
            WHERE member_id = $1
            ORDER BY payment_date DESC, id DESC
            "#,
        )
        .bind(member_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list payments"))?;
        rows.into_iter().map(Payment::try_from).collect()
    }
}
