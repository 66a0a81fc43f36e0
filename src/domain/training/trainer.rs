use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{DomainError, FieldErrors, TrainerId};

/// A trainer members can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub specialization: String,
    pub schedule: Option<String>,
}

impl Trainer {
    pub fn from_details(id: TrainerId, details: TrainerDetails) -> Self {
        Self {
            id,
            name: details.name,
            specialization: details.specialization,
            schedule: details.schedule,
        }
    }

    pub fn apply(&mut self, details: TrainerDetails) {
        self.name = details.name;
        self.specialization = details.specialization;
        self.schedule = details.schedule;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerDetails {
    pub name: String,
    pub specialization: String,
    pub schedule: Option<String>,
}

impl TrainerDetails {
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.check(text::required("name", &self.name, 100));
        let specialization = errors.check(text::required("specialization", &self.specialization, 100));
        let schedule = errors.check(text::optional("schedule", self.schedule.as_deref(), 2000));
        errors.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            specialization: specialization.unwrap_or_default(),
            schedule: schedule.flatten(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_schedule_is_dropped() {
        let details = TrainerDetails {
            name: "Jane Smith".to_string(),
            specialization: "Yoga".to_string(),
            schedule: Some("   ".to_string()),
        }
        .validated()
        .unwrap();
        assert_eq!(details.schedule, None);
    }

    #[test]
    fn specialization_is_required() {
        let err = TrainerDetails {
            name: "Jane Smith".to_string(),
            specialization: "".to_string(),
            schedule: None,
        }
        .validated()
        .unwrap_err();
        assert!(err.details.contains_key("specialization"));
    }
}
