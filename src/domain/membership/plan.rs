//! Membership plans: named durations with a price.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{DomainError, FieldErrors, Money, PlanId, ValidationError};

const NAME_MAX: usize = 100;

/// Longest plan a member can buy, in days.
pub const MAX_DURATION_DAYS: u32 = 3650;

/// A purchasable membership plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: PlanId,
    pub name: String,
    pub duration_days: u32,
    pub price: Money,
}

impl MembershipPlan {
    pub fn from_details(id: PlanId, details: PlanDetails) -> Self {
        Self {
            id,
            name: details.name,
            duration_days: details.duration_days,
            price: details.price,
        }
    }

    pub fn apply(&mut self, details: PlanDetails) {
        self.name = details.name;
        self.duration_days = details.duration_days;
        self.price = details.price;
    }
}

/// The editable fields of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetails {
    pub name: String,
    pub duration_days: u32,
    pub price: Money,
}

impl PlanDetails {
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.check(text::required("name", &self.name, NAME_MAX));
        if !(1..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            errors.push(ValidationError::out_of_range(
                "duration_days",
                1,
                i64::from(MAX_DURATION_DAYS),
                i64::from(self.duration_days),
            ));
        }
        errors.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly() -> PlanDetails {
        PlanDetails {
            name: "Monthly Basic".to_string(),
            duration_days: 30,
            price: Money::from_cents(3000).unwrap(),
        }
    }

    #[test]
    fn valid_plan_passes() {
        assert_eq!(monthly().validated().unwrap(), monthly());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = PlanDetails {
            duration_days: 0,
            ..monthly()
        }
        .validated()
        .unwrap_err();
        assert!(err.details.contains_key("duration_days"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = PlanDetails {
            name: " ".to_string(),
            ..monthly()
        }
        .validated()
        .unwrap_err();
        assert!(err.details.contains_key("name"));
    }

    #[test]
    fn price_serializes_as_cents() {
        let plan = MembershipPlan::from_details(PlanId::new(1), monthly());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["price"], 3000);
        assert_eq!(json["duration_days"], 30);
    }
}
