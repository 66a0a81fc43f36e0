//! Form payloads for goal routes.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, FieldErrors, UserId};
use crate::domain::goal::{GoalAssignment, GoalCategory, GoalDetails};

use super::super::form;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalForm {
    pub goal_type: String,
    pub description: String,
    pub target_value: String,
    pub unit: String,
    pub end_date: String,
}

impl GoalForm {
    fn parse(self, errors: &mut FieldErrors) -> Option<GoalDetails> {
        let category = errors.check(self.goal_type.parse::<GoalCategory>());
        let target_value = form::number(errors, "target_value", &self.target_value);
        let end_date = form::required_date(errors, "end_date", &self.end_date);

        Some(GoalDetails {
            category: category?,
            description: self.description,
            target_value: target_value?,
            unit: self.unit,
            end_date: end_date?,
        })
    }

    pub fn into_details(self) -> Result<GoalDetails, DomainError> {
        let mut errors = FieldErrors::new();
        let details = self.parse(&mut errors);
        errors.finish()?;
        form::present(details, "goal_type")
    }
}

/// The admin form adds the owner and the two flags. Unticked checkboxes are
/// absent from the submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminGoalForm {
    pub user_id: String,
    #[serde(flatten)]
    pub goal: GoalForm,
    pub is_admin_set: Option<String>,
    pub is_beginner_goal: Option<String>,
}

impl AdminGoalForm {
    pub fn into_assignment(self) -> Result<GoalAssignment, DomainError> {
        let mut errors = FieldErrors::new();
        let user_id = form::required_choice::<UserId>(&mut errors, "user_id", &self.user_id);
        let details = self.goal.parse(&mut errors);
        errors.finish()?;

        Ok(GoalAssignment {
            user_id: form::present(user_id, "user_id")?,
            details: form::present(details, "goal_type")?,
            is_admin_set: form::checkbox(self.is_admin_set.as_deref()),
            is_beginner_goal: form::checkbox(self.is_beginner_goal.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProgressForm {
    pub current_value: String,
}

/// `?user_id=` on the admin listing. Blank shows every user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminGoalQuery {
    pub user_id: String,
}

impl AdminGoalQuery {
    pub fn user_filter(&self) -> Result<Option<UserId>, DomainError> {
        let mut errors = FieldErrors::new();
        let user_id = form::choice(&mut errors, "user_id", &self.user_id);
        errors.finish()?;
        Ok(user_id)
    }
}
