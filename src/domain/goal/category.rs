use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The horizon a goal is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl GoalCategory {
    /// Every category in chart order.
    pub const ALL: [GoalCategory; 4] = [
        GoalCategory::Daily,
        GoalCategory::Weekly,
        GoalCategory::Monthly,
        GoalCategory::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Daily => "daily",
            GoalCategory::Weekly => "weekly",
            GoalCategory::Monthly => "monthly",
            GoalCategory::Yearly => "yearly",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format("goal_type", "must be daily, weekly, monthly or yearly")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_names() {
        assert_eq!("weekly".parse::<GoalCategory>().unwrap(), GoalCategory::Weekly);
        assert!("hourly".parse::<GoalCategory>().is_err());
    }

    #[test]
    fn chart_order_is_shortest_first() {
        let names: Vec<_> = GoalCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["daily", "weekly", "monthly", "yearly"]);
    }
}
