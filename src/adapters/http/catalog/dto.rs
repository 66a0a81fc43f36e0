//! Form payloads for catalog routes.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, FieldErrors};
use crate::domain::membership::PlanDetails;
use crate::domain::training::{TrainerDetails, WorkoutPlanDetails};

use super::super::form;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub name: String,
    pub duration_days: String,
    pub price: String,
}

impl PlanForm {
    pub fn into_details(self) -> Result<PlanDetails, DomainError> {
        let mut errors = FieldErrors::new();
        let duration_days = form::days(&mut errors, "duration_days", &self.duration_days);
        let price = form::money(&mut errors, "price", &self.price);
        errors.finish()?;

        Ok(PlanDetails {
            name: self.name,
            duration_days: form::present(duration_days, "duration_days")?,
            price: form::present(price, "price")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainerForm {
    pub name: String,
    pub specialization: String,
    pub schedule: Option<String>,
}

impl From<TrainerForm> for TrainerDetails {
    fn from(form: TrainerForm) -> Self {
        TrainerDetails {
            name: form.name,
            specialization: form.specialization,
            schedule: form::optional_text(form.schedule),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkoutPlanForm {
    pub name: String,
    pub description: Option<String>,
    pub routines: Option<String>,
}

impl From<WorkoutPlanForm> for WorkoutPlanDetails {
    fn from(form: WorkoutPlanForm) -> Self {
        WorkoutPlanDetails {
            name: form.name,
            description: form::optional_text(form.description),
            routines: form::optional_text(form.routines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;

    #[test]
    fn plan_form_parses_days_and_price() {
        let details = PlanForm {
            name: "Monthly Basic".to_string(),
            duration_days: "30".to_string(),
            price: "30.00".to_string(),
        }
        .into_details()
        .unwrap();

        assert_eq!(details.duration_days, 30);
        assert_eq!(details.price, Money::from_cents(3000).unwrap());
    }

    #[test]
    fn plan_form_reports_both_bad_numbers() {
        let err = PlanForm {
            name: "Odd".to_string(),
            duration_days: "-3".to_string(),
            price: "cheap".to_string(),
        }
        .into_details()
        .unwrap_err();

        assert!(err.details.contains_key("duration_days"));
        assert!(err.details.contains_key("price"));
    }

    #[test]
    fn blank_optional_text_is_none() {
        let details: TrainerDetails = TrainerForm {
            name: "John".to_string(),
            specialization: "Strength".to_string(),
            schedule: Some("  ".to_string()),
        }
        .into();
        assert_eq!(details.schedule, None);
    }
}
