//! PostgreSQL implementation of InquiryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, InquiryId, Timestamp};
use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::ports::InquiryRepository;

use super::db_error;

#[derive(Clone)]
pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    submitted_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Inquiry {
            id: InquiryId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            submitted_at: Timestamp::from_datetime(row.submitted_at),
        }
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, DomainError> {
        let row: InquiryRow = sqlx::query_as(
            r#"
            INSERT INTO inquiries (name, email, phone, message, submitted_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, message, submitted_at
            "#,
        )
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(inquiry.submitted_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to store inquiry"))?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Inquiry>, DomainError> {
        let rows: Vec<InquiryRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, message, submitted_at
            FROM inquiries
            ORDER BY submitted_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list inquiries"))?;
        Ok(rows.into_iter().map(Inquiry::from).collect())
    }
}
