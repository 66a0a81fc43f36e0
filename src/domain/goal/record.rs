//! Goal record and its editable details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{DomainError, FieldErrors, GoalId, Timestamp, UserId, ValidationError};

use super::GoalCategory;

/// A fitness goal owned by a user.
///
/// Admin-set goals are visible to their owner but only administrators may
/// change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub user_id: UserId,
    #[serde(rename = "goal_type")]
    pub category: GoalCategory,
    pub description: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub end_date: NaiveDate,
    pub is_admin_set: bool,
    pub is_beginner_goal: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Goal {
    pub fn from_new(id: GoalId, new: NewGoal) -> Self {
        Self {
            id,
            user_id: new.user_id,
            category: new.details.category,
            description: new.details.description,
            target_value: new.details.target_value,
            current_value: 0.0,
            unit: new.details.unit,
            end_date: new.details.end_date,
            is_admin_set: new.is_admin_set,
            is_beginner_goal: new.is_beginner_goal,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }

    /// Applies a self-service edit. Ownership and flags are untouched.
    pub fn apply(&mut self, details: GoalDetails, now: Timestamp) {
        self.category = details.category;
        self.description = details.description;
        self.target_value = details.target_value;
        self.unit = details.unit;
        self.end_date = details.end_date;
        self.updated_at = now;
    }

    /// Applies an administrator edit, which may also reassign the goal.
    pub fn apply_admin(&mut self, assignment: GoalAssignment, now: Timestamp) {
        self.user_id = assignment.user_id;
        self.is_admin_set = assignment.is_admin_set;
        self.is_beginner_goal = assignment.is_beginner_goal;
        self.apply(assignment.details, now);
    }

    pub fn record_progress(&mut self, progress: Progress, now: Timestamp) {
        self.current_value = progress.0;
        self.updated_at = now;
    }
}

/// A validated progress reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress(f64);

impl Progress {
    /// Parses a submitted progress value; anything but a finite number fails.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Progress)
            .ok_or_else(|| DomainError::validation("progress", "Invalid progress value"))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// The fields a goal owner can edit.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDetails {
    pub category: GoalCategory,
    pub description: String,
    pub target_value: f64,
    pub unit: String,
    pub end_date: NaiveDate,
}

impl GoalDetails {
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        self.check(&mut errors);
        errors.finish()?;
        Ok(Self {
            description: self.description.trim().to_string(),
            unit: self.unit.trim().to_string(),
            ..self
        })
    }

    fn check(&self, errors: &mut FieldErrors) {
        errors.check(text::required("description", &self.description, 200));
        errors.check(text::required("unit", &self.unit, 50));
        if !self.target_value.is_finite() || self.target_value <= 0.0 {
            errors.push(ValidationError::invalid("target_value", "must be a positive number"));
        }
    }
}

/// An administrator's goal fields: owner and flags on top of the details.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalAssignment {
    pub user_id: UserId,
    pub details: GoalDetails,
    pub is_admin_set: bool,
    pub is_beginner_goal: bool,
}

impl GoalAssignment {
    pub fn validated(self) -> Result<Self, DomainError> {
        Ok(Self {
            details: self.details.validated()?,
            ..self
        })
    }
}

/// A goal about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub user_id: UserId,
    pub details: GoalDetails,
    pub is_admin_set: bool,
    pub is_beginner_goal: bool,
    pub created_at: Timestamp,
}

impl NewGoal {
    /// A goal a user sets for themself.
    pub fn self_set(user_id: UserId, details: GoalDetails, now: Timestamp) -> Self {
        Self {
            user_id,
            details,
            is_admin_set: false,
            is_beginner_goal: false,
            created_at: now,
        }
    }

    pub fn assigned(assignment: GoalAssignment, now: Timestamp) -> Self {
        Self {
            user_id: assignment.user_id,
            details: assignment.details,
            is_admin_set: assignment.is_admin_set,
            is_beginner_goal: assignment.is_beginner_goal,
            created_at: now,
        }
    }
}
