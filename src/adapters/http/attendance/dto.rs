use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::handlers::CheckInCommand;
use crate::domain::foundation::{DomainError, FieldErrors, Timestamp};

use super::super::form;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckInForm {
    pub member_id: String,
    /// Blank means now.
    pub check_in_time: String,
}

impl CheckInForm {
    pub fn into_command(self, now: Timestamp, today: NaiveDate) -> Result<CheckInCommand, DomainError> {
        let mut errors = FieldErrors::new();
        let member_id = form::required_choice(&mut errors, "member_id", &self.member_id);
        let check_in_time = form::timestamp_or(&mut errors, "check_in_time", &self.check_in_time, now);
        errors.finish()?;

        Ok(CheckInCommand {
            member_id: form::present(member_id, "member_id")?,
            check_in_time,
            today,
        })
    }
}
