//! PostgreSQL implementation of the catalog repositories.
//!
//! Plans, trainers and workout plans share one adapter since they are
//! plain lookup tables. Deleting a row that members still reference fails
//! with `ResourceInUse`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PlanId, TrainerId, WorkoutPlanId,
};
use crate::domain::membership::{MembershipPlan, PlanDetails};
use crate::domain::training::{Trainer, TrainerDetails, WorkoutPlan, WorkoutPlanDetails};
use crate::ports::{PlanRepository, TrainerRepository, WorkoutPlanRepository};

use super::{db_error, is_foreign_key_violation};

#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_row(
        &self,
        sql: &str,
        id: i64,
        not_found: DomainError,
        in_use: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DomainError::in_use(in_use)
                } else {
                    DomainError::database("Failed to delete catalog entry", e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found);
        }
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: i64,
    name: String,
    duration_days: i32,
    price_cents: i64,
}

impl TryFrom<PlanRow> for MembershipPlan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid {} for plan {}", what, row.id),
            )
        };
        Ok(MembershipPlan {
            id: PlanId::new(row.id),
            duration_days: u32::try_from(row.duration_days).map_err(|_| corrupt("duration"))?,
            price: Money::from_cents(row.price_cents).map_err(|_| corrupt("price"))?,
            name: row.name,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TrainerRow {
    id: i64,
    name: String,
    specialization: String,
    schedule: Option<String>,
}

impl From<TrainerRow> for Trainer {
    fn from(row: TrainerRow) -> Self {
        Trainer {
            id: TrainerId::new(row.id),
            name: row.name,
            specialization: row.specialization,
            schedule: row.schedule,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkoutPlanRow {
    id: i64,
    name: String,
    description: Option<String>,
    routines: Option<String>,
}

impl From<WorkoutPlanRow> for WorkoutPlan {
    fn from(row: WorkoutPlanRow) -> Self {
        WorkoutPlan {
            id: WorkoutPlanId::new(row.id),
            name: row.name,
            description: row.description,
            routines: row.routines,
        }
    }
}

fn duration_param(days: u32) -> i32 {
    i32::try_from(days).unwrap_or(i32::MAX)
}

#[async_trait]
impl PlanRepository for PostgresCatalogRepository {
    async fn insert(&self, details: PlanDetails) -> Result<MembershipPlan, DomainError> {
        let row: PlanRow = sqlx::query_as(
            r#"
            INSERT INTO membership_plans (name, duration_days, price_cents)
            VALUES ($1, $2, $3)
            RETURNING id, name, duration_days, price_cents
            "#,
        )
        .bind(&details.name)
        .bind(duration_param(details.duration_days))
        .bind(details.price.cents())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to insert plan"))?;
        row.try_into()
    }

    async fn update(&self, plan: &MembershipPlan) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE membership_plans SET name = $2, duration_days = $3, price_cents = $4 WHERE id = $1",
        )
        .bind(plan.id.value())
        .bind(&plan.name)
        .bind(duration_param(plan.duration_days))
        .bind(plan.price.cents())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update plan"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::PlanNotFound, "Plan", plan.id));
        }
        Ok(())
    }

    async fn delete(&self, id: PlanId) -> Result<(), DomainError> {
        self.delete_row(
            "DELETE FROM membership_plans WHERE id = $1",
            id.value(),
            DomainError::not_found(ErrorCode::PlanNotFound, "Plan", id),
            "Cannot delete plan: Members are currently assigned to it.",
        )
        .await
    }

    async fn find_by_id(&self, id: PlanId) -> Result<Option<MembershipPlan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            "SELECT id, name, duration_days, price_cents FROM membership_plans WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load plan"))?;
        row.map(MembershipPlan::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<MembershipPlan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            "SELECT id, name, duration_days, price_cents FROM membership_plans ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list plans"))?;
        rows.into_iter().map(MembershipPlan::try_from).collect()
    }
}

#[async_trait]
impl TrainerRepository for PostgresCatalogRepository {
    async fn insert(&self, details: TrainerDetails) -> Result<Trainer, DomainError> {
        let row: TrainerRow = sqlx::query_as(
            r#"
            INSERT INTO trainers (name, specialization, schedule)
            VALUES ($1, $2, $3)
            RETURNING id, name, specialization, schedule
            "#,
        )
        .bind(&details.name)
        .bind(&details.specialization)
        .bind(&details.schedule)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to insert trainer"))?;
        Ok(row.into())
    }

    async fn update(&self, trainer: &Trainer) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE trainers SET name = $2, specialization = $3, schedule = $4 WHERE id = $1",
        )
        .bind(trainer.id.value())
        .bind(&trainer.name)
        .bind(&trainer.specialization)
        .bind(&trainer.schedule)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update trainer"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::TrainerNotFound,
                "Trainer",
                trainer.id,
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: TrainerId) -> Result<(), DomainError> {
        self.delete_row(
            "DELETE FROM trainers WHERE id = $1",
            id.value(),
            DomainError::not_found(ErrorCode::TrainerNotFound, "Trainer", id),
            "Cannot delete trainer: Members are currently assigned to them.",
        )
        .await
    }

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, DomainError> {
        let row: Option<TrainerRow> = sqlx::query_as(
            "SELECT id, name, specialization, schedule FROM trainers WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load trainer"))?;
        Ok(row.map(Trainer::from))
    }

    async fn list(&self) -> Result<Vec<Trainer>, DomainError> {
        let rows: Vec<TrainerRow> = sqlx::query_as(
            "SELECT id, name, specialization, schedule FROM trainers ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list trainers"))?;
        Ok(rows.into_iter().map(Trainer::from).collect())
    }
}

#[async_trait]
impl WorkoutPlanRepository for PostgresCatalogRepository {
    async fn insert(&self, details: WorkoutPlanDetails) -> Result<WorkoutPlan, DomainError> {
        let row: WorkoutPlanRow = sqlx::query_as(
            r#"
            INSERT INTO workout_plans (name, description, routines)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, routines
            "#,
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(&details.routines)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to insert workout plan"))?;
        Ok(row.into())
    }

    async fn update(&self, plan: &WorkoutPlan) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE workout_plans SET name = $2, description = $3, routines = $4 WHERE id = $1",
        )
        .bind(plan.id.value())
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(&plan.routines)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update workout plan"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::WorkoutPlanNotFound,
                "Workout plan",
                plan.id,
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: WorkoutPlanId) -> Result<(), DomainError> {
        self.delete_row(
            "DELETE FROM workout_plans WHERE id = $1",
            id.value(),
            DomainError::not_found(ErrorCode::WorkoutPlanNotFound, "Workout plan", id),
            "Cannot delete workout plan: Members are currently assigned to it.",
        )
        .await
    }

    async fn find_by_id(&self, id: WorkoutPlanId) -> Result<Option<WorkoutPlan>, DomainError> {
        let row: Option<WorkoutPlanRow> = sqlx::query_as(
            "SELECT id, name, description, routines FROM workout_plans WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load workout plan"))?;
        Ok(row.map(WorkoutPlan::from))
    }

    async fn list(&self) -> Result<Vec<WorkoutPlan>, DomainError> {
        let rows: Vec<WorkoutPlanRow> = sqlx::query_as(
            "SELECT id, name, description, routines FROM workout_plans ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list workout plans"))?;
        Ok(rows.into_iter().map(WorkoutPlan::from).collect())
    }
}
