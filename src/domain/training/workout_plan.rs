use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{DomainError, FieldErrors, WorkoutPlanId};

/// A workout plan members can follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: WorkoutPlanId,
    pub name: String,
    pub description: Option<String>,
    pub routines: Option<String>,
}

impl WorkoutPlan {
    pub fn from_details(id: WorkoutPlanId, details: WorkoutPlanDetails) -> Self {
        Self {
            id,
            name: details.name,
            description: details.description,
            routines: details.routines,
        }
    }

    pub fn apply(&mut self, details: WorkoutPlanDetails) {
        self.name = details.name;
        self.description = details.description;
        self.routines = details.routines;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlanDetails {
    pub name: String,
    pub description: Option<String>,
    pub routines: Option<String>,
}

impl WorkoutPlanDetails {
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.check(text::required("name", &self.name, 100));
        let description = errors.check(text::optional("description", self.description.as_deref(), 2000));
        let routines = errors.check(text::optional("routines", self.routines.as_deref(), 5000));
        errors.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            description: description.flatten(),
            routines: routines.flatten(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_plan_is_valid() {
        let details = WorkoutPlanDetails {
            name: " Advanced Cardio ".to_string(),
            description: None,
            routines: Some("30 min HIIT, 15 min steady state".to_string()),
        }
        .validated()
        .unwrap();
        assert_eq!(details.name, "Advanced Cardio");
        assert!(details.routines.is_some());
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = WorkoutPlanDetails {
            name: String::new(),
            description: None,
            routines: None,
        }
        .validated()
        .unwrap_err();
        assert!(err.details.contains_key("name"));
    }
}
