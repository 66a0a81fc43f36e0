//! PostgreSQL implementation of GoalRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, GoalId, Timestamp, UserId};
use crate::domain::goal::{Goal, GoalCategory, NewGoal};
use crate::ports::GoalRepository;

use super::{db_error, reference_error};

const GOAL_COLUMNS: &str = "id, user_id, goal_type, description, target_value, current_value, \
     unit, end_date, is_admin_set, is_beginner_goal, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresGoalRepository {
    pool: PgPool,
}

impl PostgresGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GoalRow {
    id: i64,
    user_id: i64,
    goal_type: String,
    description: String,
    target_value: f64,
    current_value: f64,
    unit: String,
    end_date: NaiveDate,
    is_admin_set: bool,
    is_beginner_goal: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = DomainError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        let category: GoalCategory = row.goal_type.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid goal type value: {}", row.goal_type),
            )
        })?;

        Ok(Goal {
            id: GoalId::new(row.id),
            user_id: UserId::new(row.user_id),
            category,
            description: row.description,
            target_value: row.target_value,
            current_value: row.current_value,
            unit: row.unit,
            end_date: row.end_date,
            is_admin_set: row.is_admin_set,
            is_beginner_goal: row.is_beginner_goal,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn insert(&self, goal: NewGoal) -> Result<Goal, DomainError> {
        let sql = format!(
            "INSERT INTO goals (user_id, goal_type, description, target_value, unit, end_date, \
             is_admin_set, is_beginner_goal, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING {}",
            GOAL_COLUMNS
        );
        let row: GoalRow = sqlx::query_as(&sql)
            .bind(goal.user_id.value())
            .bind(goal.details.category.as_str())
            .bind(&goal.details.description)
            .bind(goal.details.target_value)
            .bind(&goal.details.unit)
            .bind(goal.details.end_date)
            .bind(goal.is_admin_set)
            .bind(goal.is_beginner_goal)
            .bind(goal.created_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| reference_error("goals", "Failed to insert goal", e))?;
        row.try_into()
    }

    async fn update(&self, goal: &Goal) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE goals SET
                user_id = $2,
                goal_type = $3,
                description = $4,
                target_value = $5,
                current_value = $6,
                unit = $7,
                end_date = $8,
                is_admin_set = $9,
                is_beginner_goal = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(goal.id.value())
        .bind(goal.user_id.value())
        .bind(goal.category.as_str())
        .bind(&goal.description)
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(&goal.unit)
        .bind(goal.end_date)
        .bind(goal.is_admin_set)
        .bind(goal.is_beginner_goal)
        .bind(goal.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| reference_error("goals", "Failed to update goal", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::GoalNotFound, "Goal", goal.id));
        }
        Ok(())
    }

    async fn delete(&self, id: GoalId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete goal"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::GoalNotFound, "Goal", id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: GoalId) -> Result<Option<Goal>, DomainError> {
        let sql = format!("SELECT {} FROM goals WHERE id = $1", GOAL_COLUMNS);
        let row: Option<GoalRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load goal"))?;
        row.map(Goal::try_from).transpose()
    }

    async fn list(&self, owner: Option<UserId>) -> Result<Vec<Goal>, DomainError> {
        let sql = format!(
            "SELECT {} FROM goals \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
             ORDER BY end_date DESC, id DESC",
            GOAL_COLUMNS
        );
        let rows: Vec<GoalRow> = sqlx::query_as(&sql)
            .bind(owner.map(i64::from))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list goals"))?;
        rows.into_iter().map(Goal::try_from).collect()
    }
}
