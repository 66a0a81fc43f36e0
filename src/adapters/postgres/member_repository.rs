//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, PlanId, TrainerId, WorkoutPlanId,
};
use crate::domain::membership::{Member, MembershipWindow, NewMember};
use crate::domain::user::{NewUser, User};
use crate::ports::MemberRepository;

use super::user_repository::UserRow;
use super::{account_error, db_error, reference_error};

pub(super) const MEMBER_COLUMNS: &str = "id, name, email, phone, join_date, \
     membership_start_date, membership_end_date, membership_plan_id, trainer_id, workout_plan_id";

/// PostgreSQL implementation of the MemberRepository port.
#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    join_date: NaiveDate,
    membership_start_date: Option<NaiveDate>,
    membership_end_date: Option<NaiveDate>,
    membership_plan_id: Option<i64>,
    trainer_id: Option<i64>,
    workout_plan_id: Option<i64>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            join_date: row.join_date,
            window: MembershipWindow::new(row.membership_start_date, row.membership_end_date),
            plan_id: row.membership_plan_id.map(PlanId::new),
            trainer_id: row.trainer_id.map(TrainerId::new),
            workout_plan_id: row.workout_plan_id.map(WorkoutPlanId::new),
        }
    }
}

fn insert_sql() -> String {
    format!(
        "INSERT INTO members (name, email, phone, join_date, membership_start_date, \
         membership_end_date, membership_plan_id, trainer_id, workout_plan_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
        MEMBER_COLUMNS
    )
}

/// Writes every editable column of `member`. Returns the number of rows hit.
async fn update_member<'e, E>(executor: E, member: &Member) -> Result<u64, DomainError>
where
    E: sqlx::PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE members SET
            name = $2,
            email = $3,
            phone = $4,
            membership_start_date = $5,
            membership_end_date = $6,
            membership_plan_id = $7,
            trainer_id = $8,
            workout_plan_id = $9
        WHERE id = $1
        "#,
    )
    .bind(member.id.value())
    .bind(&member.name)
    .bind(&member.email)
    .bind(&member.phone)
    .bind(member.window.start)
    .bind(member.window.end)
    .bind(member.plan_id.map(i64::from))
    .bind(member.trainer_id.map(i64::from))
    .bind(member.workout_plan_id.map(i64::from))
    .execute(executor)
    .await
    .map_err(|e| reference_error("members", "Failed to update member", e))?;

    Ok(result.rows_affected())
}

fn member_not_found(id: MemberId) -> DomainError {
    DomainError::not_found(ErrorCode::MemberNotFound, "Member", id)
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn insert(&self, member: NewMember) -> Result<Member, DomainError> {
        let sql = insert_sql();
        let row: MemberRow = bind_new_member(sqlx::query_as(&sql), &member)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| reference_error("members", "Failed to insert member", e))?;
        Ok(row.into())
    }

    async fn insert_with_account(
        &self,
        member: NewMember,
        account: NewUser,
    ) -> Result<(Member, User), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let sql = insert_sql();
        let member: Member = bind_new_member(sqlx::query_as::<_, MemberRow>(&sql), &member)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| reference_error("members", "Failed to insert member", e))?
            .into();

        let user: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash, role, member_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, role, member_id
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .bind(member.id.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(account_error)?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok((member, User::try_from(user)?))
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        if update_member(&self.pool, member).await? == 0 {
            return Err(member_not_found(member.id));
        }
        Ok(())
    }

    async fn delete(&self, id: MemberId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete member"))?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        let row: Option<MemberRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load member"))?;
        Ok(row.map(Member::from))
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members ORDER BY name, id", MEMBER_COLUMNS);
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list members"))?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn count_by_plan(&self, plan_id: PlanId) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE membership_plan_id = $1")
            .bind(plan_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count members"))
    }

    async fn count_by_trainer(&self, trainer_id: TrainerId) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE trainer_id = $1")
            .bind(trainer_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count members"))
    }

    async fn count_by_workout_plan(&self, workout_plan_id: WorkoutPlanId) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE workout_plan_id = $1")
            .bind(workout_plan_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count members"))
    }

    async fn find_expiring_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members \
             WHERE membership_end_date BETWEEN $1 AND $2 \
             ORDER BY membership_end_date, id",
            MEMBER_COLUMNS
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find expiring members"))?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_lapsed_before(&self, date: NaiveDate) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members \
             WHERE membership_end_date < $1 \
             ORDER BY membership_end_date DESC, id",
            MEMBER_COLUMNS
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find lapsed members"))?;
        Ok(rows.into_iter().map(Member::from).collect())
    }
}

type MemberQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, MemberRow, sqlx::postgres::PgArguments>;

fn bind_new_member<'q>(query: MemberQuery<'q>, member: &'q NewMember) -> MemberQuery<'q> {
    let d = &member.details;
    query
        .bind(&d.name)
        .bind(&d.email)
        .bind(&d.phone)
        .bind(member.join_date)
        .bind(d.window.start)
        .bind(d.window.end)
        .bind(d.plan_id.map(i64::from))
        .bind(d.trainer_id.map(i64::from))
        .bind(d.workout_plan_id.map(i64::from))
}
