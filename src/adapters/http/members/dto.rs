//! Form payloads for member routes.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, FieldErrors};
use crate::domain::membership::{MemberDetails, MembershipWindow};

use super::super::form;

/// The member form. Select fields submit `0` or nothing for "none".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub membership_start_date: String,
    pub membership_end_date: String,
    pub membership_plan_id: String,
    pub trainer_id: String,
    pub workout_plan_id: String,
}

impl MemberForm {
    /// Parses the dates and selects. Text fields are checked by the domain.
    pub fn into_details(self) -> Result<MemberDetails, DomainError> {
        let mut errors = FieldErrors::new();
        let start = form::optional_date(&mut errors, "membership_start_date", &self.membership_start_date);
        let end = form::optional_date(&mut errors, "membership_end_date", &self.membership_end_date);
        let plan_id = form::choice(&mut errors, "membership_plan_id", &self.membership_plan_id);
        let trainer_id = form::choice(&mut errors, "trainer_id", &self.trainer_id);
        let workout_plan_id = form::choice(&mut errors, "workout_plan_id", &self.workout_plan_id);
        errors.finish()?;

        Ok(MemberDetails {
            name: self.name,
            email: self.email,
            phone: self.phone,
            window: MembershipWindow::new(start, end),
            plan_id,
            trainer_id,
            workout_plan_id,
        })
    }
}
