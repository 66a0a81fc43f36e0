//! Member record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{
    DomainError, FieldErrors, MemberId, PlanId, TrainerId, ValidationError, WorkoutPlanId,
};

use super::MembershipWindow;

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;

/// A gym member.
///
/// `plan_id`, `trainer_id` and `workout_plan_id` are optional assignments.
/// The membership window may be empty (never paid) or lapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub join_date: NaiveDate,
    #[serde(flatten)]
    pub window: MembershipWindow,
    #[serde(rename = "membership_plan_id")]
    pub plan_id: Option<PlanId>,
    pub trainer_id: Option<TrainerId>,
    pub workout_plan_id: Option<WorkoutPlanId>,
}

impl Member {
    /// Builds the stored record for a draft that was assigned `id`.
    pub fn from_new(id: MemberId, new: NewMember) -> Self {
        let NewMember { join_date, details } = new;
        Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            join_date,
            window: details.window,
            plan_id: details.plan_id,
            trainer_id: details.trainer_id,
            workout_plan_id: details.workout_plan_id,
        }
    }

    /// Overwrites every editable field. The join date never changes.
    pub fn apply(&mut self, details: MemberDetails) {
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
        self.window = details.window;
        self.plan_id = details.plan_id;
        self.trainer_id = details.trainer_id;
        self.workout_plan_id = details.workout_plan_id;
    }

    /// Returns true if the member's plan is active on `date`.
    pub fn is_membership_active(&self, date: NaiveDate) -> bool {
        self.window.is_active_on(date)
    }
}

/// The editable fields of a member as submitted by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub window: MembershipWindow,
    pub plan_id: Option<PlanId>,
    pub trainer_id: Option<TrainerId>,
    pub workout_plan_id: Option<WorkoutPlanId>,
}

impl MemberDetails {
    /// Trims the text fields and checks every field, reporting all failures.
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.check(text::required("name", &self.name, NAME_MAX));
        let email = errors.check(text::email("email", &self.email));
        let phone = errors.check(text::required("phone", &self.phone, PHONE_MAX));
        if self.window.is_inverted() {
            errors.push(ValidationError::invalid(
                "membership_end_date",
                "must not be before the start date",
            ));
        }
        errors.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            ..self
        })
    }
}

/// A member about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub join_date: NaiveDate,
    pub details: MemberDetails,
}

impl NewMember {
    /// A member joins on their membership start date, or on `today` without one.
    pub fn joining(details: MemberDetails, today: NaiveDate) -> Self {
        Self {
            join_date: details.window.start.unwrap_or(today),
            details,
        }
    }
}
